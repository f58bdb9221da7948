//! Entity adapter contract plugged into the generic coordinator.

use crate::errors::Result;
use crate::sync::{Document, SyncableRecord};

/// Per-entity strategy: collection name, key rule, and document codec.
///
/// One implementation exists per synchronized entity type; everything else
/// about the four sync operations is shared by the coordinator.
pub trait EntityAdapter: Send + Sync + 'static {
    type Record: SyncableRecord;

    /// Remote collection name under `owner/{ownerId}/`.
    fn collection() -> &'static str;

    /// Full remote payload for an upsert. Local-only bookkeeping
    /// (`isSynced`, `deletedAt`) never leaves the device.
    fn to_document(record: &Self::Record) -> Document;

    /// Map a pulled document to the local shape. Payload fields are read
    /// defensively and default when absent; only missing identity fields
    /// fail, and that failure is isolated to the one document.
    fn from_document(owner_id: &str, doc: &Document) -> Result<Self::Record>;
}
