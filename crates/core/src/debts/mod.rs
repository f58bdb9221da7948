//! Debt entity and its dependent payment records.

mod adapter;
mod model;
mod service;

pub use adapter::*;
pub use model::*;
pub use service::*;
