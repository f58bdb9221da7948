//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sync::{SyncableRecord, SyncMeta};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
    #[default]
    Unknown,
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
    pub note: String,
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Transaction {
    pub fn new(
        owner_id: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionKind,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            category: category.into(),
            kind,
            date,
            note: String::new(),
            sync: SyncMeta::new(owner_id),
        }
    }
}

impl SyncableRecord for Transaction {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn meta(&self) -> &SyncMeta {
        &self.sync
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.sync
    }
}
