//! Child-cascade policy applied when a parent record is soft-deleted.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::Result;
use crate::stores::{ChildStore, RemoteStore};
use crate::sync::ChildRecord;

/// Hook invoked by the coordinator after tombstoning a parent record.
#[async_trait]
pub trait CascadeHook: Send + Sync {
    /// Handle the parent's children. Runs regardless of connectivity;
    /// `remote_reachable` only gates the best-effort remote cleanup.
    /// Returns the number of children removed locally.
    async fn on_parent_deleted(
        &self,
        owner_id: &str,
        parent_key: &str,
        remote_reachable: bool,
    ) -> Result<usize>;
}

/// Binary cascade policy: children are hard-deleted from local storage
/// synchronously and unconditionally when their parent is tombstoned.
///
/// Children carry no tombstones, so remote cleanup is best-effort only:
/// when the remote is reachable each child document is deleted from its
/// collection, and failures are logged and swallowed. A parent deleted
/// offline leaves any previously synced child documents behind remotely.
pub struct ChildCascade<C: ChildRecord> {
    children: Arc<dyn ChildStore<C>>,
    child_remote: Arc<dyn RemoteStore>,
    child_collection: &'static str,
}

impl<C: ChildRecord> ChildCascade<C> {
    pub fn new(
        children: Arc<dyn ChildStore<C>>,
        child_remote: Arc<dyn RemoteStore>,
        child_collection: &'static str,
    ) -> Self {
        Self {
            children,
            child_remote,
            child_collection,
        }
    }
}

#[async_trait]
impl<C: ChildRecord> CascadeHook for ChildCascade<C> {
    async fn on_parent_deleted(
        &self,
        owner_id: &str,
        parent_key: &str,
        remote_reachable: bool,
    ) -> Result<usize> {
        let children = self.children.list_for_parent(owner_id, parent_key).await?;
        let removed = self
            .children
            .hard_delete_for_parent(owner_id, parent_key)
            .await?;
        debug!(
            "cascade removed {} {} children of {}",
            removed, self.child_collection, parent_key
        );

        if remote_reachable {
            for child in &children {
                if let Err(err) = self.child_remote.delete(owner_id, child.key()).await {
                    warn!(
                        "remote cleanup of {} child {} failed: {}",
                        self.child_collection,
                        child.key(),
                        err
                    );
                }
            }
        }

        Ok(removed)
    }
}
