//! Generic synchronization engine: record metadata, document mapping,
//! entity adapters, the coordinator algorithm, and the child-cascade policy.

mod adapter;
mod cascade;
mod coordinator;
mod document;
mod record;

pub use adapter::*;
pub use cascade::*;
pub use coordinator::*;
pub use document::*;
pub use record::*;
