//! Offline-first synchronization engine for the PocketLedger personal
//! finance tracker.
//!
//! Local writes are the durability point: every mutation lands in the
//! [`stores::LocalStore`] first and is mirrored to the [`stores::RemoteStore`]
//! on a best-effort basis when connectivity allows. Records left behind by a
//! failed or skipped mirror stay flagged unsynced until an explicit
//! [`sync::SyncCoordinator::flush_pending`] pass, and
//! [`sync::SyncCoordinator::pull_all`] replaces local state with the remote
//! collection on app resume or login.

pub mod budgets;
pub mod categories;
pub mod connectivity;
pub mod debts;
pub mod errors;
pub mod savings;
pub mod stores;
pub mod sync;
pub mod transactions;
pub mod users;

pub use errors::{Error, Result};
