//! Category domain model.

use serde::{Deserialize, Serialize};

use crate::sync::{SyncableRecord, SyncMeta};

/// Whether a category classifies money going out or coming in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Expense,
    Income,
    #[default]
    Unknown,
}

/// A user-defined category. The name is the identity: renaming a category is
/// a delete plus a create, never an in-place key change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub kind: CategoryKind,
    pub icon: String,
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Category {
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: String::new(),
            sync: SyncMeta::new(owner_id),
        }
    }
}

impl SyncableRecord for Category {
    fn key(&self) -> String {
        self.name.clone()
    }

    fn meta(&self) -> &SyncMeta {
        &self.sync
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.sync
    }
}
