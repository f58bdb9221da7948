//! HTTP `RemoteStore` backed by the PocketLedger cloud document API.
//!
//! Collections live under `owners/{ownerId}/{collection}` and documents under
//! `owners/{ownerId}/{collection}/{key}`.

mod client;

pub use client::HttpRemoteStore;
