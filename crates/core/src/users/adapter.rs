//! Document codec for user profiles.

use serde_json::{json, Value};

use crate::errors::Result;
use crate::sync::{self, Document, EntityAdapter, SyncMeta};
use crate::users::UserProfile;

pub struct UserAdapter;

impl EntityAdapter for UserAdapter {
    type Record = UserProfile;

    fn collection() -> &'static str {
        "users"
    }

    fn to_document(record: &UserProfile) -> Document {
        let mut doc = Document::new();
        doc.insert("id".into(), Value::String(record.sync.owner_id.clone()));
        doc.insert("name".into(), Value::String(record.name.clone()));
        doc.insert("email".into(), Value::String(record.email.clone()));
        doc.insert("photoUrl".into(), Value::String(record.photo_url.clone()));
        doc.insert("currency".into(), Value::String(record.currency.clone()));
        doc.insert("updatedAt".into(), json!(record.sync.updated_at.to_rfc3339()));
        doc
    }

    fn from_document(owner_id: &str, doc: &Document) -> Result<UserProfile> {
        // The profile document is keyed by the owner itself, so an absent id
        // field is tolerated rather than treated as unmappable.
        let mut meta = SyncMeta::new(owner_id);
        meta.updated_at = sync::get_datetime_or_now(doc, "updatedAt");
        Ok(UserProfile {
            name: sync::get_str(doc, "name"),
            email: sync::get_str(doc, "email"),
            photo_url: sync::get_str(doc, "photoUrl"),
            currency: sync::get_str(doc, "currency"),
            sync: meta,
        })
    }
}
