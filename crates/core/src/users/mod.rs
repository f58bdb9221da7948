//! User profile entity.

mod adapter;
mod model;

pub use adapter::*;
pub use model::*;
