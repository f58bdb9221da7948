//! Debt and payment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sync::{ChildRecord, SyncableRecord, SyncMeta};

/// Money owed to a creditor. `current_balance` is a derived running balance:
/// it starts at the original amount and decreases with every payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub creditor: String,
    pub original_amount: f64,
    pub current_balance: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub note: String,
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Debt {
    pub fn new(owner_id: impl Into<String>, creditor: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            creditor: creditor.into(),
            original_amount: amount,
            current_balance: amount,
            due_date: None,
            note: String::new(),
            sync: SyncMeta::new(owner_id),
        }
    }
}

impl SyncableRecord for Debt {
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

/// A payment against a debt. Payments are not independently synchronized:
/// they carry no tombstone and are hard-deleted with their parent debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub debt_id: String,
    pub owner_id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub note: String,
}

impl Payment {
    pub fn new(
        owner_id: impl Into<String>,
        debt_id: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            debt_id: debt_id.into(),
            owner_id: owner_id.into(),
            amount,
            date,
            note: String::new(),
        }
    }
}

impl ChildRecord for Payment {
    fn key(&self) -> &str {
        &self.id
    }

    fn parent_key(&self) -> &str {
        &self.debt_id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
