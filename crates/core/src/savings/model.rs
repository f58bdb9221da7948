//! Saving goal and contribution domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sync::{ChildRecord, SyncableRecord, SyncMeta};

/// A savings goal. `current_amount` is a derived running balance: it starts
/// at zero and increases with every contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saving {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub note: String,
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Saving {
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        target_amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline: None,
            note: String::new(),
            sync: SyncMeta::new(owner_id),
        }
    }
}

impl SyncableRecord for Saving {
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

/// A contribution toward a saving goal. Not independently synchronized;
/// hard-deleted with the parent goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub saving_id: String,
    pub owner_id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub note: String,
}

impl Contribution {
    pub fn new(
        owner_id: impl Into<String>,
        saving_id: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            saving_id: saving_id.into(),
            owner_id: owner_id.into(),
            amount,
            date,
            note: String::new(),
        }
    }
}

impl ChildRecord for Contribution {
    fn key(&self) -> &str {
        &self.id
    }

    fn parent_key(&self) -> &str {
        &self.saving_id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
