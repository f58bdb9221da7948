//! In-memory implementations of the PocketLedger store contracts.
//!
//! The on-device database engine is an external collaborator; these stores
//! satisfy the same contracts for hosts that have not wired a persistent
//! backend yet and for exercising the sync engine end to end.

mod children;
mod local;
mod remote;

pub use children::MemoryChildStore;
pub use local::MemoryLocalStore;
pub use remote::MemoryRemoteStore;
