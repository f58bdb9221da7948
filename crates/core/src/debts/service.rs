//! Debt sync service: coordinator wiring plus the payment balance rule.

use std::sync::Arc;

use serde_json::json;

use crate::connectivity::ConnectivityMonitor;
use crate::debts::{Debt, DebtAdapter, Payment, PAYMENTS_COLLECTION};
use crate::errors::{Error, Result, StoreError};
use crate::stores::{ChildStore, LocalStore, RemoteStore};
use crate::sync::{
    ChildCascade, Document, FlushSummary, PullSummary, SyncCoordinator,
};

/// Sync-aware debt operations. Deleting a debt cascades over its payments;
/// recording a payment recomputes the running balance and mirrors only the
/// changed balance field remotely.
pub struct DebtService {
    coordinator: SyncCoordinator<DebtAdapter>,
    payments: Arc<dyn ChildStore<Payment>>,
}

impl DebtService {
    pub fn new(
        local: Arc<dyn LocalStore<Debt>>,
        payments: Arc<dyn ChildStore<Payment>>,
        debt_remote: Arc<dyn RemoteStore>,
        payment_remote: Arc<dyn RemoteStore>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        let cascade = Arc::new(ChildCascade::new(
            payments.clone(),
            payment_remote,
            PAYMENTS_COLLECTION,
        ));
        let coordinator =
            SyncCoordinator::new(local, debt_remote, connectivity).with_cascade(cascade);
        Self {
            coordinator,
            payments,
        }
    }

    pub async fn save_debt(&self, debt: Debt) -> Result<Debt> {
        self.coordinator.save(debt).await
    }

    pub async fn get_debt(&self, owner_id: &str, debt_id: &str) -> Result<Option<Debt>> {
        self.coordinator.get(owner_id, debt_id).await
    }

    pub async fn list_active_debts(&self, owner_id: &str) -> Result<Vec<Debt>> {
        self.coordinator.list_active(owner_id).await
    }

    /// Tombstone the debt and hard-delete its payments.
    pub async fn delete_debt(&self, owner_id: &str, debt_id: &str) -> Result<()> {
        self.coordinator.soft_delete(owner_id, debt_id).await
    }

    /// Record a payment: insert the child, decrease the parent's running
    /// balance, and mirror only `currentBalance` + `updatedAt` remotely.
    pub async fn record_payment(&self, payment: Payment) -> Result<Debt> {
        let mut debt = self
            .coordinator
            .get(&payment.owner_id, &payment.debt_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(payment.debt_id.clone()))?;
        if debt.sync.is_deleted() {
            return Err(Error::InvalidRecord(format!(
                "debt {} is deleted",
                payment.debt_id
            )));
        }

        self.payments.insert(payment.clone()).await?;
        debt.current_balance -= payment.amount;

        let mut fields = Document::new();
        fields.insert("currentBalance".into(), json!(debt.current_balance));
        self.coordinator.update_partial(debt, fields).await
    }

    pub async fn list_payments(&self, owner_id: &str, debt_id: &str) -> Result<Vec<Payment>> {
        Ok(self.payments.list_for_parent(owner_id, debt_id).await?)
    }

    pub async fn flush_pending(&self, owner_id: &str) -> Result<FlushSummary> {
        self.coordinator.flush_pending(owner_id).await
    }

    pub async fn pull_all(&self, owner_id: &str) -> Result<PullSummary> {
        self.coordinator.pull_all(owner_id).await
    }
}
