//! Saving sync service: coordinator wiring plus the contribution balance rule.

use std::sync::Arc;

use serde_json::json;

use crate::connectivity::ConnectivityMonitor;
use crate::errors::{Error, Result, StoreError};
use crate::savings::{Contribution, Saving, SavingAdapter, CONTRIBUTIONS_COLLECTION};
use crate::stores::{ChildStore, LocalStore, RemoteStore};
use crate::sync::{
    ChildCascade, Document, FlushSummary, PullSummary, SyncCoordinator,
};

/// Sync-aware saving-goal operations. Deleting a goal cascades over its
/// contributions; recording a contribution recomputes the running amount and
/// mirrors only the changed balance field remotely.
pub struct SavingService {
    coordinator: SyncCoordinator<SavingAdapter>,
    contributions: Arc<dyn ChildStore<Contribution>>,
}

impl SavingService {
    pub fn new(
        local: Arc<dyn LocalStore<Saving>>,
        contributions: Arc<dyn ChildStore<Contribution>>,
        saving_remote: Arc<dyn RemoteStore>,
        contribution_remote: Arc<dyn RemoteStore>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        let cascade = Arc::new(ChildCascade::new(
            contributions.clone(),
            contribution_remote,
            CONTRIBUTIONS_COLLECTION,
        ));
        let coordinator =
            SyncCoordinator::new(local, saving_remote, connectivity).with_cascade(cascade);
        Self {
            coordinator,
            contributions,
        }
    }

    pub async fn save_goal(&self, saving: Saving) -> Result<Saving> {
        self.coordinator.save(saving).await
    }

    pub async fn get_goal(&self, owner_id: &str, saving_id: &str) -> Result<Option<Saving>> {
        self.coordinator.get(owner_id, saving_id).await
    }

    pub async fn list_active_goals(&self, owner_id: &str) -> Result<Vec<Saving>> {
        self.coordinator.list_active(owner_id).await
    }

    /// Tombstone the goal and hard-delete its contributions.
    pub async fn delete_goal(&self, owner_id: &str, saving_id: &str) -> Result<()> {
        self.coordinator.soft_delete(owner_id, saving_id).await
    }

    /// Record a contribution: insert the child, increase the parent's running
    /// amount, and mirror only `currentAmount` + `updatedAt` remotely.
    pub async fn record_contribution(&self, contribution: Contribution) -> Result<Saving> {
        let mut saving = self
            .coordinator
            .get(&contribution.owner_id, &contribution.saving_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(contribution.saving_id.clone()))?;
        if saving.sync.is_deleted() {
            return Err(Error::InvalidRecord(format!(
                "saving goal {} is deleted",
                contribution.saving_id
            )));
        }

        self.contributions.insert(contribution.clone()).await?;
        saving.current_amount += contribution.amount;

        let mut fields = Document::new();
        fields.insert("currentAmount".into(), json!(saving.current_amount));
        self.coordinator.update_partial(saving, fields).await
    }

    pub async fn list_contributions(
        &self,
        owner_id: &str,
        saving_id: &str,
    ) -> Result<Vec<Contribution>> {
        Ok(self
            .contributions
            .list_for_parent(owner_id, saving_id)
            .await?)
    }

    pub async fn flush_pending(&self, owner_id: &str) -> Result<FlushSummary> {
        self.coordinator.flush_pending(owner_id).await
    }

    pub async fn pull_all(&self, owner_id: &str) -> Result<PullSummary> {
        self.coordinator.pull_all(owner_id).await
    }
}
