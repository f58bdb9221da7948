//! Document codec for saving goals.

use serde_json::{json, Value};

use crate::errors::Result;
use crate::savings::Saving;
use crate::sync::{self, Document, EntityAdapter, SyncMeta};

pub struct SavingAdapter;

/// Remote collection holding contribution documents mirrored for savings.
pub const CONTRIBUTIONS_COLLECTION: &str = "contributions";

impl EntityAdapter for SavingAdapter {
    type Record = Saving;

    fn collection() -> &'static str {
        "savings"
    }

    fn to_document(record: &Saving) -> Document {
        let mut doc = Document::new();
        doc.insert("id".into(), Value::String(record.id.clone()));
        doc.insert("name".into(), Value::String(record.name.clone()));
        doc.insert("targetAmount".into(), json!(record.target_amount));
        doc.insert("currentAmount".into(), json!(record.current_amount));
        doc.insert(
            "deadline".into(),
            match &record.deadline {
                Some(deadline) => json!(deadline.to_rfc3339()),
                None => Value::Null,
            },
        );
        doc.insert("note".into(), Value::String(record.note.clone()));
        doc.insert("updatedAt".into(), json!(record.sync.updated_at.to_rfc3339()));
        doc
    }

    fn from_document(owner_id: &str, doc: &Document) -> Result<Saving> {
        let id = sync::require_str(doc, "id")?;
        let mut meta = SyncMeta::new(owner_id);
        meta.updated_at = sync::get_datetime_or_now(doc, "updatedAt");
        Ok(Saving {
            id,
            name: sync::get_str(doc, "name"),
            target_amount: sync::get_f64(doc, "targetAmount"),
            current_amount: sync::get_f64(doc, "currentAmount"),
            deadline: sync::get_datetime(doc, "deadline"),
            note: sync::get_str(doc, "note"),
            sync: meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_saving_starts_empty() {
        let saving = Saving::new("acct-1", "Vacation", 2000.0);
        assert_eq!(saving.current_amount, 0.0);
        assert!(!saving.sync.is_synced);
    }

    #[test]
    fn sparse_document_maps_with_defaults() {
        let doc = json!({ "id": "sav-1" }).as_object().cloned().expect("object");
        let mapped = SavingAdapter::from_document("acct-1", &doc).expect("maps");
        assert_eq!(mapped.name, "");
        assert_eq!(mapped.target_amount, 0.0);
        assert!(mapped.deadline.is_none());
    }

    #[test]
    fn document_round_trip_keeps_progress() {
        let mut saving = Saving::new("acct-1", "Vacation", 2000.0);
        saving.current_amount = 350.0;
        let doc = SavingAdapter::to_document(&saving);
        let mapped = SavingAdapter::from_document("acct-1", &doc).expect("maps");
        assert_eq!(mapped.target_amount, 2000.0);
        assert_eq!(mapped.current_amount, 350.0);
    }
}
