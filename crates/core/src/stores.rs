//! Store and connectivity contracts the engine orchestrates.
//!
//! The local database engine and the remote transport are external
//! collaborators; the engine only depends on these traits. Implementations
//! must support safe concurrent single-row writes — coordinator operations
//! run as independent tasks with no global serialization.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{RemoteError, StoreError};
use crate::sync::{ChildRecord, Document, SyncableRecord};

/// Always-available on-device storage for one entity type. Source of truth
/// for reads; the only write a caller ever waits on for success.
#[async_trait]
pub trait LocalStore<R: SyncableRecord>: Send + Sync {
    /// Insert the record or replace the row with the same owner and key.
    async fn insert_or_replace(&self, record: R) -> Result<(), StoreError>;

    /// Tombstone a record: set `deleted_at`, bump `updated_at`, clear
    /// `is_synced`. A second call on an existing tombstone is a no-op, so
    /// `deleted_at` keeps the time of the first call.
    async fn soft_delete(
        &self,
        owner_id: &str,
        key: &str,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Point lookup, tombstoned rows included.
    async fn get_by_id(&self, owner_id: &str, key: &str) -> Result<Option<R>, StoreError>;

    /// All non-tombstoned records for this owner.
    async fn list_active(&self, owner_id: &str) -> Result<Vec<R>, StoreError>;

    /// All records pending sync for this owner, tombstones included.
    async fn list_unsynced(&self, owner_id: &str) -> Result<Vec<R>, StoreError>;

    /// Compare-and-set sync confirmation: flip `is_synced` to true only when
    /// the stored `updated_at` still equals `pushed_updated_at`. Returns
    /// whether the flag was set; a newer concurrent edit leaves the record
    /// pending and returns false.
    async fn confirm_synced(
        &self,
        owner_id: &str,
        key: &str,
        pushed_updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;
}

/// On-device storage for dependent child records. Children have no sync
/// metadata of their own; they live and die with their parent.
#[async_trait]
pub trait ChildStore<C: ChildRecord>: Send + Sync {
    async fn insert(&self, child: C) -> Result<(), StoreError>;

    async fn list_for_parent(
        &self,
        owner_id: &str,
        parent_key: &str,
    ) -> Result<Vec<C>, StoreError>;

    /// Physically remove every child of the parent. Returns the number of
    /// rows deleted.
    async fn hard_delete_for_parent(
        &self,
        owner_id: &str,
        parent_key: &str,
    ) -> Result<usize, StoreError>;
}

/// One per-owner remote collection, keyed by document id (or the derived
/// composite key for budgets). Scoped under `owner/{ownerId}/{collection}`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Upsert the full document under `key`.
    async fn upsert(&self, owner_id: &str, key: &str, document: Document)
        -> Result<(), RemoteError>;

    /// Partial update of the named fields only.
    async fn update_fields(
        &self,
        owner_id: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), RemoteError>;

    /// Delete the document. Deleting an absent key succeeds.
    async fn delete(&self, owner_id: &str, key: &str) -> Result<(), RemoteError>;

    /// Fetch the entire collection for this owner.
    async fn fetch_all(&self, owner_id: &str) -> Result<Vec<Document>, RemoteError>;
}
