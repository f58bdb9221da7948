//! Sync bookkeeping carried by every synchronized record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sync metadata tracked per record.
///
/// `is_synced == true` means the last successful remote write reflects the
/// current `updated_at`; any local mutation after that must flip it back to
/// `false`. A non-null `deleted_at` marks the record as a local tombstone:
/// hidden from active views but retained until its deletion is confirmed
/// remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMeta {
    pub owner_id: String,
    pub updated_at: DateTime<Utc>,
    pub is_synced: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SyncMeta {
    /// Fresh metadata for a locally created record: pending sync, no tombstone.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            updated_at: Utc::now(),
            is_synced: false,
            deleted_at: None,
        }
    }

    /// True when the record is tombstoned.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A record the engine can synchronize.
///
/// The key is the record's remote document id: a client-generated id for most
/// entities, the business key itself for categories and budgets.
pub trait SyncableRecord: Clone + Send + Sync + 'static {
    fn key(&self) -> String;
    fn meta(&self) -> &SyncMeta;
    fn meta_mut(&mut self) -> &mut SyncMeta;

    fn owner_id(&self) -> &str {
        &self.meta().owner_id
    }
}

/// A dependent child record (a payment under a debt, a contribution under a
/// saving). Children are not independently synchronized: they carry no
/// tombstones and are hard-deleted with their parent.
pub trait ChildRecord: Clone + Send + Sync + 'static {
    fn key(&self) -> &str;
    fn parent_key(&self) -> &str;
    fn owner_id(&self) -> &str;
}
