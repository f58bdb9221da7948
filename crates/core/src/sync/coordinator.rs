//! Generic sync coordinator: the four-operation algorithm shared by every
//! synchronized entity type.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use serde_json::Value;

use crate::connectivity::ConnectivityMonitor;
use crate::errors::Result;
use crate::stores::{LocalStore, RemoteStore};
use crate::sync::{CascadeHook, Document, EntityAdapter, SyncableRecord};

/// Outcome of one `flush_pending` pass. Per-record failures are isolated,
/// so a single pass can report successes and failures together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    /// Live records upserted remotely and confirmed synced.
    pub pushed: usize,
    /// Tombstones whose remote delete succeeded.
    pub deleted: usize,
    /// Records whose remote call failed; they stay pending.
    pub failed: usize,
    /// Records pushed successfully but edited concurrently, so the sync
    /// confirmation was withheld and they stay pending.
    pub stale: usize,
}

/// Outcome of one `pull_all` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullSummary {
    /// Documents mapped and written over local state.
    pub applied: usize,
    /// Documents skipped because the local record has unsynced changes.
    pub skipped_pending: usize,
    /// Documents that could not be mapped (missing identity fields).
    pub failed: usize,
}

/// Orchestrates local durability, opportunistic remote mirroring, explicit
/// flushes, and full pulls for one entity type.
///
/// The local write is the durability point and the only step a caller waits
/// on for success. Remote mirrors are best-effort: failures are logged and
/// the record stays flagged unsynced until the next flush.
pub struct SyncCoordinator<A: EntityAdapter> {
    local: Arc<dyn LocalStore<A::Record>>,
    remote: Arc<dyn RemoteStore>,
    connectivity: Arc<dyn ConnectivityMonitor>,
    cascade: Option<Arc<dyn CascadeHook>>,
    _adapter: PhantomData<A>,
}

impl<A: EntityAdapter> SyncCoordinator<A> {
    pub fn new(
        local: Arc<dyn LocalStore<A::Record>>,
        remote: Arc<dyn RemoteStore>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        Self {
            local,
            remote,
            connectivity,
            cascade: None,
            _adapter: PhantomData,
        }
    }

    /// Attach the child-cascade hook (debts and savings).
    pub fn with_cascade(mut self, cascade: Arc<dyn CascadeHook>) -> Self {
        self.cascade = Some(cascade);
        self
    }

    /// Create or update a record. Bumps `updated_at`, clears `is_synced`,
    /// writes locally, then mirrors remotely when online. The returned record
    /// reflects the stored sync state.
    pub async fn save(&self, mut record: A::Record) -> Result<A::Record> {
        let now = Utc::now();
        {
            let meta = record.meta_mut();
            meta.updated_at = now;
            meta.is_synced = false;
        }
        self.local.insert_or_replace(record.clone()).await?;

        if self.connectivity.is_available_now() {
            let owner_id = record.owner_id().to_string();
            let key = record.key();
            match self
                .remote
                .upsert(&owner_id, &key, A::to_document(&record))
                .await
            {
                Ok(()) => {
                    let confirmed = self.local.confirm_synced(&owner_id, &key, now).await?;
                    record.meta_mut().is_synced = confirmed;
                }
                Err(err) => {
                    warn!(
                        "opportunistic push of {}/{} failed, left pending: {}",
                        A::collection(),
                        key,
                        err
                    );
                }
            }
        }

        Ok(record)
    }

    /// Update a record whose remote mirror should only touch the named
    /// fields (derived balances). The full record is written locally; the
    /// remote sees `fields` plus the new `updatedAt`.
    pub async fn update_partial(
        &self,
        mut record: A::Record,
        mut fields: Document,
    ) -> Result<A::Record> {
        let now = Utc::now();
        {
            let meta = record.meta_mut();
            meta.updated_at = now;
            meta.is_synced = false;
        }
        self.local.insert_or_replace(record.clone()).await?;

        if self.connectivity.is_available_now() {
            let owner_id = record.owner_id().to_string();
            let key = record.key();
            fields.insert("updatedAt".to_string(), Value::String(now.to_rfc3339()));
            match self.remote.update_fields(&owner_id, &key, fields).await {
                Ok(()) => {
                    let confirmed = self.local.confirm_synced(&owner_id, &key, now).await?;
                    record.meta_mut().is_synced = confirmed;
                }
                Err(err) => {
                    warn!(
                        "partial push of {}/{} failed, left pending: {}",
                        A::collection(),
                        key,
                        err
                    );
                }
            }
        }

        Ok(record)
    }

    /// Tombstone a record, cascade its children, and attempt the remote
    /// delete when online. A successful remote delete confirms the tombstone
    /// synced so it is not re-submitted by later flushes.
    pub async fn soft_delete(&self, owner_id: &str, key: &str) -> Result<()> {
        let now = Utc::now();
        self.local.soft_delete(owner_id, key, now).await?;

        let online = self.connectivity.is_available_now();
        if let Some(cascade) = &self.cascade {
            cascade.on_parent_deleted(owner_id, key, online).await?;
        }

        if online {
            match self.remote.delete(owner_id, key).await {
                Ok(()) => {
                    // Double deletes keep the original tombstone untouched,
                    // so `now` may not match and the confirm is skipped.
                    let _ = self.local.confirm_synced(owner_id, key, now).await?;
                }
                Err(err) => {
                    warn!(
                        "remote delete of {}/{} failed, left pending: {}",
                        A::collection(),
                        key,
                        err
                    );
                }
            }
        }

        Ok(())
    }

    /// Push every pending record for this owner. No-op when offline or when
    /// there is no owner identity to scope to. Each record is handled
    /// independently; one remote failure never aborts the rest of the pass.
    pub async fn flush_pending(&self, owner_id: &str) -> Result<FlushSummary> {
        let mut summary = FlushSummary::default();
        if owner_id.is_empty() || !self.connectivity.is_available_now() {
            return Ok(summary);
        }

        let pending = self.local.list_unsynced(owner_id).await?;
        debug!(
            "flushing {} pending {} records for {}",
            pending.len(),
            A::collection(),
            owner_id
        );

        for record in pending {
            let key = record.key();
            if record.meta().is_deleted() {
                match self.remote.delete(owner_id, &key).await {
                    Ok(()) => {
                        self.local
                            .confirm_synced(owner_id, &key, record.meta().updated_at)
                            .await?;
                        summary.deleted += 1;
                    }
                    Err(err) => {
                        summary.failed += 1;
                        warn!("flush delete of {}/{} failed: {}", A::collection(), key, err);
                    }
                }
            } else {
                match self
                    .remote
                    .upsert(owner_id, &key, A::to_document(&record))
                    .await
                {
                    Ok(()) => {
                        if self
                            .local
                            .confirm_synced(owner_id, &key, record.meta().updated_at)
                            .await?
                        {
                            summary.pushed += 1;
                        } else {
                            summary.stale += 1;
                        }
                    }
                    Err(err) => {
                        summary.failed += 1;
                        warn!("flush push of {}/{} failed: {}", A::collection(), key, err);
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Fetch the owner's remote collection and overwrite local state with it,
    /// marking every applied record synced and clearing tombstones. Records
    /// with unsynced local changes are skipped so pending edits survive a
    /// concurrent pull; a document that fails to map is skipped without
    /// aborting the rest.
    pub async fn pull_all(&self, owner_id: &str) -> Result<PullSummary> {
        let mut summary = PullSummary::default();
        if owner_id.is_empty() {
            return Ok(summary);
        }

        let documents = self.remote.fetch_all(owner_id).await.map_err(|err| {
            warn!("pull of {} for {} failed: {}", A::collection(), owner_id, err);
            err
        })?;

        for doc in &documents {
            let mut record = match A::from_document(owner_id, doc) {
                Ok(record) => record,
                Err(err) => {
                    summary.failed += 1;
                    warn!("skipping unmappable {} document: {}", A::collection(), err);
                    continue;
                }
            };

            let key = record.key();
            if let Some(existing) = self.local.get_by_id(owner_id, &key).await? {
                if !existing.meta().is_synced {
                    summary.skipped_pending += 1;
                    continue;
                }
            }

            {
                let meta = record.meta_mut();
                meta.is_synced = true;
                meta.deleted_at = None;
            }
            self.local.insert_or_replace(record).await?;
            summary.applied += 1;
        }

        debug!(
            "pulled {} {} documents for {}: {} applied, {} pending-skipped, {} failed",
            documents.len(),
            A::collection(),
            owner_id,
            summary.applied,
            summary.skipped_pending,
            summary.failed
        );
        Ok(summary)
    }

    /// Point lookup in local storage, tombstones included.
    pub async fn get(&self, owner_id: &str, key: &str) -> Result<Option<A::Record>> {
        Ok(self.local.get_by_id(owner_id, key).await?)
    }

    /// All non-tombstoned records for this owner, from local storage.
    pub async fn list_active(&self, owner_id: &str) -> Result<Vec<A::Record>> {
        Ok(self.local.list_active(owner_id).await?)
    }
}
