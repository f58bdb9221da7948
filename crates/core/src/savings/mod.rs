//! Saving goal entity and its dependent contribution records.

mod adapter;
mod model;
mod service;

pub use adapter::*;
pub use model::*;
pub use service::*;
