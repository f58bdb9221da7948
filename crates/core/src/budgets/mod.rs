//! Monthly per-category budget entity.

mod adapter;
mod model;

pub use adapter::*;
pub use model::*;
