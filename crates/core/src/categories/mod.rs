//! Spending/income category entity.

mod adapter;
mod model;

pub use adapter::*;
pub use model::*;
