//! In-memory `ChildStore` keyed by (owner, child key).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pocketledger_core::errors::StoreError;
use pocketledger_core::stores::ChildStore;
use pocketledger_core::sync::ChildRecord;

type Rows<C> = HashMap<(String, String), C>;

/// HashMap-backed store for dependent child records.
pub struct MemoryChildStore<C: ChildRecord> {
    rows: RwLock<Rows<C>>,
}

impl<C: ChildRecord> MemoryChildStore<C> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Rows<C>>, StoreError> {
        self.rows
            .write()
            .map_err(|_| StoreError::Backend("row lock is poisoned".to_string()))
    }
}

impl<C: ChildRecord> Default for MemoryChildStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<C: ChildRecord> ChildStore<C> for MemoryChildStore<C> {
    async fn insert(&self, child: C) -> Result<(), StoreError> {
        let slot = (child.owner_id().to_string(), child.key().to_string());
        self.write()?.insert(slot, child);
        Ok(())
    }

    async fn list_for_parent(
        &self,
        owner_id: &str,
        parent_key: &str,
    ) -> Result<Vec<C>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::Backend("row lock is poisoned".to_string()))?;
        let mut children: Vec<C> = rows
            .values()
            .filter(|c| c.owner_id() == owner_id && c.parent_key() == parent_key)
            .cloned()
            .collect();
        children.sort_by(|a, b| a.key().cmp(b.key()));
        Ok(children)
    }

    async fn hard_delete_for_parent(
        &self,
        owner_id: &str,
        parent_key: &str,
    ) -> Result<usize, StoreError> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|_, c| !(c.owner_id() == owner_id && c.parent_key() == parent_key));
        Ok(before - rows.len())
    }
}
