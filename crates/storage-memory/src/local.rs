//! In-memory `LocalStore` keyed by (owner, record key).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pocketledger_core::errors::StoreError;
use pocketledger_core::stores::LocalStore;
use pocketledger_core::sync::SyncableRecord;

type Rows<R> = HashMap<(String, String), R>;

/// HashMap-backed local store. A single `RwLock` gives the safe concurrent
/// single-row writes the engine contract assumes, and makes
/// `confirm_synced` a genuine compare-and-set.
pub struct MemoryLocalStore<R: SyncableRecord> {
    rows: RwLock<Rows<R>>,
}

impl<R: SyncableRecord> MemoryLocalStore<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Rows<R>>, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::Backend("row lock is poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Rows<R>>, StoreError> {
        self.rows
            .write()
            .map_err(|_| StoreError::Backend("row lock is poisoned".to_string()))
    }
}

impl<R: SyncableRecord> Default for MemoryLocalStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: SyncableRecord> LocalStore<R> for MemoryLocalStore<R> {
    async fn insert_or_replace(&self, record: R) -> Result<(), StoreError> {
        let slot = (record.owner_id().to_string(), record.key());
        self.write()?.insert(slot, record);
        Ok(())
    }

    async fn soft_delete(
        &self,
        owner_id: &str,
        key: &str,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut rows = self.write()?;
        let record = rows
            .get_mut(&(owner_id.to_string(), key.to_string()))
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let meta = record.meta_mut();
        if meta.deleted_at.is_none() {
            meta.deleted_at = Some(deleted_at);
            meta.updated_at = deleted_at;
            meta.is_synced = false;
        }
        Ok(())
    }

    async fn get_by_id(&self, owner_id: &str, key: &str) -> Result<Option<R>, StoreError> {
        Ok(self
            .read()?
            .get(&(owner_id.to_string(), key.to_string()))
            .cloned())
    }

    async fn list_active(&self, owner_id: &str) -> Result<Vec<R>, StoreError> {
        let mut records: Vec<R> = self
            .read()?
            .values()
            .filter(|r| r.owner_id() == owner_id && !r.meta().is_deleted())
            .cloned()
            .collect();
        records.sort_by(|a, b| b.meta().updated_at.cmp(&a.meta().updated_at));
        Ok(records)
    }

    async fn list_unsynced(&self, owner_id: &str) -> Result<Vec<R>, StoreError> {
        let mut records: Vec<R> = self
            .read()?
            .values()
            .filter(|r| r.owner_id() == owner_id && !r.meta().is_synced)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.key());
        Ok(records)
    }

    async fn confirm_synced(
        &self,
        owner_id: &str,
        key: &str,
        pushed_updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut rows = self.write()?;
        let Some(record) = rows.get_mut(&(owner_id.to_string(), key.to_string())) else {
            return Ok(false);
        };
        if record.meta().updated_at != pushed_updated_at {
            return Ok(false);
        }
        record.meta_mut().is_synced = true;
        Ok(true)
    }
}
