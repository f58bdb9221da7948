//! End-to-end engine behavior against the in-memory stores.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use pocketledger_core::budgets::{Budget, BudgetAdapter};
use pocketledger_core::connectivity::WatchConnectivity;
use pocketledger_core::errors::RemoteError;
use pocketledger_core::stores::{LocalStore, RemoteStore};
use pocketledger_core::sync::{Document, SyncCoordinator, SyncableRecord};
use pocketledger_core::transactions::{Transaction, TransactionAdapter, TransactionKind};
use pocketledger_storage_memory::{MemoryLocalStore, MemoryRemoteStore};

const OWNER: &str = "acct-1";

/// Remote wrapper that fails every call touching a configured key.
struct FlakyRemoteStore {
    inner: Arc<MemoryRemoteStore>,
    failing_keys: Mutex<HashSet<String>>,
}

impl FlakyRemoteStore {
    fn new(inner: Arc<MemoryRemoteStore>) -> Self {
        Self {
            inner,
            failing_keys: Mutex::new(HashSet::new()),
        }
    }

    fn fail_key(&self, key: &str) {
        self.failing_keys.lock().expect("lock").insert(key.to_string());
    }

    fn check(&self, key: &str) -> Result<(), RemoteError> {
        if self.failing_keys.lock().expect("lock").contains(key) {
            return Err(RemoteError::api(503, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FlakyRemoteStore {
    async fn upsert(&self, owner: &str, key: &str, doc: Document) -> Result<(), RemoteError> {
        self.check(key)?;
        self.inner.upsert(owner, key, doc).await
    }

    async fn update_fields(&self, owner: &str, key: &str, f: Document) -> Result<(), RemoteError> {
        self.check(key)?;
        self.inner.update_fields(owner, key, f).await
    }

    async fn delete(&self, owner: &str, key: &str) -> Result<(), RemoteError> {
        self.check(key)?;
        self.inner.delete(owner, key).await
    }

    async fn fetch_all(&self, owner: &str) -> Result<Vec<Document>, RemoteError> {
        self.inner.fetch_all(owner).await
    }
}

struct Harness {
    local: Arc<MemoryLocalStore<Transaction>>,
    remote: Arc<MemoryRemoteStore>,
    flaky: Arc<FlakyRemoteStore>,
    connectivity: Arc<WatchConnectivity>,
    coordinator: SyncCoordinator<TransactionAdapter>,
}

fn harness(online: bool) -> Harness {
    let local = Arc::new(MemoryLocalStore::new());
    let remote = Arc::new(MemoryRemoteStore::new());
    let flaky = Arc::new(FlakyRemoteStore::new(remote.clone()));
    let connectivity = Arc::new(WatchConnectivity::new(online));
    let coordinator = SyncCoordinator::new(
        local.clone(),
        flaky.clone(),
        connectivity.clone(),
    );
    Harness {
        local,
        remote,
        flaky,
        connectivity,
        coordinator,
    }
}

fn expense(amount: f64) -> Transaction {
    Transaction::new(OWNER, amount, "Groceries", TransactionKind::Expense, Utc::now())
}

#[tokio::test]
async fn offline_create_is_durable_and_pending() {
    let h = harness(false);
    let txn = h.coordinator.save(expense(12.5)).await.expect("save");

    assert!(!txn.sync.is_synced);
    let stored = h
        .local
        .get_by_id(OWNER, &txn.id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(stored.amount, 12.5);
    assert!(!stored.sync.is_synced);
    assert!(h.remote.is_empty());
}

#[tokio::test]
async fn online_create_mirrors_and_confirms() {
    let h = harness(true);
    let txn = h.coordinator.save(expense(30.0)).await.expect("save");

    assert!(txn.sync.is_synced);
    let doc = h.remote.get_document(OWNER, &txn.id).expect("mirrored");
    assert_eq!(doc.get("amount"), Some(&json!(30.0)));
    assert!(doc.get("isSynced").is_none());
}

#[tokio::test]
async fn opportunistic_push_failure_is_swallowed() {
    let h = harness(true);
    let txn = expense(5.0);
    h.flaky.fail_key(&txn.id);

    let saved = h.coordinator.save(txn).await.expect("local write still ok");
    assert!(!saved.sync.is_synced);
    assert!(h.remote.is_empty());

    let pending = h.local.list_unsynced(OWNER).await.expect("list");
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn flush_isolates_per_record_failures() {
    let h = harness(false);
    let mut keys = Vec::new();
    for i in 0..5 {
        let txn = h.coordinator.save(expense(f64::from(i))).await.expect("save");
        keys.push(txn.id);
    }
    h.connectivity.set_online(true);
    h.flaky.fail_key(&keys[2]);

    let summary = h.coordinator.flush_pending(OWNER).await.expect("flush");
    assert_eq!(summary.pushed, 4);
    assert_eq!(summary.failed, 1);

    let pending = h.local.list_unsynced(OWNER).await.expect("list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, keys[2]);
}

#[tokio::test]
async fn flushed_tombstone_is_confirmed_and_not_resubmitted() {
    let h = harness(true);
    let txn = h.coordinator.save(expense(8.0)).await.expect("save");
    assert!(h.remote.get_document(OWNER, &txn.id).is_some());

    h.connectivity.set_online(false);
    h.coordinator.soft_delete(OWNER, &txn.id).await.expect("delete");
    assert_eq!(h.local.list_unsynced(OWNER).await.expect("list").len(), 1);

    h.connectivity.set_online(true);
    let summary = h.coordinator.flush_pending(OWNER).await.expect("flush");
    assert_eq!(summary.deleted, 1);
    assert!(h.remote.get_document(OWNER, &txn.id).is_none());
    assert!(h.local.list_unsynced(OWNER).await.expect("list").is_empty());
}

#[tokio::test]
async fn soft_delete_is_idempotent_and_hides_the_record() {
    let h = harness(false);
    let txn = h.coordinator.save(expense(8.0)).await.expect("save");

    h.coordinator.soft_delete(OWNER, &txn.id).await.expect("first");
    let first = h
        .local
        .get_by_id(OWNER, &txn.id)
        .await
        .expect("get")
        .expect("tombstone kept");
    let first_deleted_at = first.sync.deleted_at.expect("tombstoned");

    h.coordinator.soft_delete(OWNER, &txn.id).await.expect("second");
    let second = h
        .local
        .get_by_id(OWNER, &txn.id)
        .await
        .expect("get")
        .expect("still one row");
    assert_eq!(second.sync.deleted_at, Some(first_deleted_at));

    assert!(h.coordinator.list_active(OWNER).await.expect("list").is_empty());
    assert_eq!(h.local.list_unsynced(OWNER).await.expect("list").len(), 1);
}

#[tokio::test]
async fn online_delete_confirms_the_tombstone() {
    let h = harness(true);
    let txn = h.coordinator.save(expense(8.0)).await.expect("save");

    h.coordinator.soft_delete(OWNER, &txn.id).await.expect("delete");
    assert!(h.remote.get_document(OWNER, &txn.id).is_none());
    assert!(h.local.list_unsynced(OWNER).await.expect("list").is_empty());
    assert!(h.coordinator.list_active(OWNER).await.expect("list").is_empty());
}

#[tokio::test]
async fn pull_applies_documents_and_marks_them_synced() {
    let h = harness(true);
    h.remote.put_document(
        OWNER,
        "txn-remote",
        json!({ "id": "txn-remote", "amount": 99.0, "category": "Rent" })
            .as_object()
            .cloned()
            .expect("object"),
    );

    let summary = h.coordinator.pull_all(OWNER).await.expect("pull");
    assert_eq!(summary.applied, 1);

    let pulled = h
        .local
        .get_by_id(OWNER, "txn-remote")
        .await
        .expect("get")
        .expect("applied");
    assert!(pulled.sync.is_synced);
    assert!(pulled.sync.deleted_at.is_none());
    assert_eq!(pulled.amount, 99.0);
    // Missing optional fields default instead of failing the document.
    assert_eq!(pulled.note, "");
    assert_eq!(pulled.kind, TransactionKind::Unknown);
}

#[tokio::test]
async fn pull_isolates_unmappable_documents() {
    let h = harness(true);
    h.remote.put_document(
        OWNER,
        "bad",
        json!({ "amount": 1.0 }).as_object().cloned().expect("object"),
    );
    h.remote.put_document(
        OWNER,
        "good",
        json!({ "id": "good", "amount": 2.0 }).as_object().cloned().expect("object"),
    );

    let summary = h.coordinator.pull_all(OWNER).await.expect("pull");
    assert_eq!(summary.applied, 1);
    assert_eq!(summary.failed, 1);
    assert!(h.local.get_by_id(OWNER, "good").await.expect("get").is_some());
}

#[tokio::test]
async fn pull_skips_records_with_pending_local_changes() {
    let h = harness(true);
    let txn = h.coordinator.save(expense(10.0)).await.expect("save");

    // Edit offline so the local copy is newer than the mirrored document.
    h.connectivity.set_online(false);
    let mut edited = txn.clone();
    edited.amount = 45.0;
    let edited = h.coordinator.save(edited).await.expect("edit");
    assert!(!edited.sync.is_synced);

    h.connectivity.set_online(true);
    let summary = h.coordinator.pull_all(OWNER).await.expect("pull");
    assert_eq!(summary.skipped_pending, 1);
    assert_eq!(summary.applied, 0);

    let kept = h
        .local
        .get_by_id(OWNER, &txn.id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(kept.amount, 45.0);
    assert!(!kept.sync.is_synced);
}

#[tokio::test]
async fn pull_does_not_resurrect_unconfirmed_tombstones() {
    let h = harness(true);
    let txn = h.coordinator.save(expense(10.0)).await.expect("save");

    h.connectivity.set_online(false);
    h.coordinator.soft_delete(OWNER, &txn.id).await.expect("delete");

    h.connectivity.set_online(true);
    let summary = h.coordinator.pull_all(OWNER).await.expect("pull");
    assert_eq!(summary.skipped_pending, 1);

    let kept = h
        .local
        .get_by_id(OWNER, &txn.id)
        .await
        .expect("get")
        .expect("tombstone kept");
    assert!(kept.sync.is_deleted());
}

#[tokio::test]
async fn sync_operations_without_owner_identity_are_no_ops() {
    let h = harness(true);
    let flush = h.coordinator.flush_pending("").await.expect("flush");
    assert_eq!(flush, Default::default());
    let pull = h.coordinator.pull_all("").await.expect("pull");
    assert_eq!(pull, Default::default());
}

#[tokio::test]
async fn flush_while_offline_is_a_no_op() {
    let h = harness(false);
    h.coordinator.save(expense(1.0)).await.expect("save");
    let summary = h.coordinator.flush_pending(OWNER).await.expect("flush");
    assert_eq!(summary, Default::default());
    assert!(h.remote.is_empty());
}

#[tokio::test]
async fn concurrent_edit_during_flush_keeps_record_pending() {
    let h = harness(false);
    let txn = h.coordinator.save(expense(10.0)).await.expect("save");

    // Simulate the race: the flush pass read this snapshot, then an edit
    // landed before the sync confirmation.
    let snapshot_updated_at = txn.sync.updated_at;
    let mut edited = txn.clone();
    edited.amount = 99.0;
    h.coordinator.save(edited).await.expect("edit");

    let confirmed = h
        .local
        .confirm_synced(OWNER, &txn.id, snapshot_updated_at)
        .await
        .expect("confirm");
    assert!(!confirmed);
    assert_eq!(h.local.list_unsynced(OWNER).await.expect("list").len(), 1);
}

#[tokio::test]
async fn budget_pull_with_missing_amount_defaults_to_zero() {
    let local: Arc<MemoryLocalStore<Budget>> = Arc::new(MemoryLocalStore::new());
    let remote = Arc::new(MemoryRemoteStore::new());
    let connectivity = Arc::new(WatchConnectivity::new(true));
    let coordinator: SyncCoordinator<BudgetAdapter> =
        SyncCoordinator::new(local.clone(), remote.clone(), connectivity);

    let budget = Budget::new(OWNER, "Groceries", 3, 2024, 250.0);
    assert_eq!(budget.key(), "Groceries_3_2024");
    coordinator.save(budget).await.expect("save");

    // The remote copy for the same composite key lost its amount field.
    remote.put_document(
        OWNER,
        "Groceries_3_2024",
        json!({ "category": "Groceries", "month": 3, "year": 2024 })
            .as_object()
            .cloned()
            .expect("object"),
    );

    let summary = coordinator.pull_all(OWNER).await.expect("pull");
    assert_eq!(summary.applied, 1);

    let pulled = local
        .get_by_id(OWNER, "Groceries_3_2024")
        .await
        .expect("get")
        .expect("present");
    assert_eq!(pulled.amount, 0.0);
    assert!(pulled.sync.is_synced);
}
