//! In-memory `RemoteStore`: one owner-scoped document collection.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pocketledger_core::errors::RemoteError;
use pocketledger_core::stores::RemoteStore;
use pocketledger_core::sync::Document;

type Docs = HashMap<(String, String), Document>;

/// HashMap-backed remote collection with document-store semantics: upserts
/// replace whole documents, partial updates fail on absent keys, deletes are
/// idempotent.
pub struct MemoryRemoteStore {
    docs: RwLock<Docs>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
        }
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Docs>, RemoteError> {
        self.docs
            .write()
            .map_err(|_| RemoteError::Transport("document lock is poisoned".to_string()))
    }

    /// Direct read used by embedders and tests to inspect remote state.
    pub fn get_document(&self, owner_id: &str, key: &str) -> Option<Document> {
        self.docs
            .read()
            .ok()?
            .get(&(owner_id.to_string(), key.to_string()))
            .cloned()
    }

    /// Seed a document without going through the engine.
    pub fn put_document(&self, owner_id: &str, key: &str, document: Document) {
        if let Ok(mut docs) = self.docs.write() {
            docs.insert((owner_id.to_string(), key.to_string()), document);
        }
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryRemoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn upsert(
        &self,
        owner_id: &str,
        key: &str,
        document: Document,
    ) -> Result<(), RemoteError> {
        self.write()?
            .insert((owner_id.to_string(), key.to_string()), document);
        Ok(())
    }

    async fn update_fields(
        &self,
        owner_id: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), RemoteError> {
        let mut docs = self.write()?;
        let doc = docs
            .get_mut(&(owner_id.to_string(), key.to_string()))
            .ok_or_else(|| RemoteError::api(404, format!("no document for key '{key}'")))?;
        for (field, value) in fields {
            doc.insert(field, value);
        }
        Ok(())
    }

    async fn delete(&self, owner_id: &str, key: &str) -> Result<(), RemoteError> {
        self.write()?
            .remove(&(owner_id.to_string(), key.to_string()));
        Ok(())
    }

    async fn fetch_all(&self, owner_id: &str) -> Result<Vec<Document>, RemoteError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| RemoteError::Transport("document lock is poisoned".to_string()))?;
        let mut all: Vec<(String, Document)> = docs
            .iter()
            .filter(|((owner, _), _)| owner == owner_id)
            .map(|((_, key), doc)| (key.clone(), doc.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(all.into_iter().map(|(_, doc)| doc).collect())
    }
}
