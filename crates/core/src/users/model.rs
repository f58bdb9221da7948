//! User profile domain model.

use serde::{Deserialize, Serialize};

use crate::sync::{SyncableRecord, SyncMeta};

/// The owner's account profile. Keyed by the account id itself, so there is
/// exactly one profile document per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub photo_url: String,
    pub currency: String,
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl UserProfile {
    pub fn new(account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            photo_url: String::new(),
            currency: String::new(),
            sync: SyncMeta::new(account_id),
        }
    }
}

impl SyncableRecord for UserProfile {
    fn key(&self) -> String {
        self.sync.owner_id.clone()
    }

    fn meta(&self) -> &SyncMeta {
        &self.sync
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.sync
    }
}
