//! Document codec for debts.

use serde_json::{json, Value};

use crate::debts::Debt;
use crate::errors::Result;
use crate::sync::{self, Document, EntityAdapter, SyncMeta};

pub struct DebtAdapter;

/// Remote collection holding payment documents mirrored for debts.
pub const PAYMENTS_COLLECTION: &str = "payments";

impl EntityAdapter for DebtAdapter {
    type Record = Debt;

    fn collection() -> &'static str {
        "debts"
    }

    fn to_document(record: &Debt) -> Document {
        let mut doc = Document::new();
        doc.insert("id".into(), Value::String(record.id.clone()));
        doc.insert("creditor".into(), Value::String(record.creditor.clone()));
        doc.insert("originalAmount".into(), json!(record.original_amount));
        doc.insert("currentBalance".into(), json!(record.current_balance));
        doc.insert(
            "dueDate".into(),
            match &record.due_date {
                Some(due) => json!(due.to_rfc3339()),
                None => Value::Null,
            },
        );
        doc.insert("note".into(), Value::String(record.note.clone()));
        doc.insert("updatedAt".into(), json!(record.sync.updated_at.to_rfc3339()));
        doc
    }

    fn from_document(owner_id: &str, doc: &Document) -> Result<Debt> {
        let id = sync::require_str(doc, "id")?;
        let mut meta = SyncMeta::new(owner_id);
        meta.updated_at = sync::get_datetime_or_now(doc, "updatedAt");
        Ok(Debt {
            id,
            creditor: sync::get_str(doc, "creditor"),
            original_amount: sync::get_f64(doc, "originalAmount"),
            current_balance: sync::get_f64(doc, "currentBalance"),
            due_date: sync::get_datetime(doc, "dueDate"),
            note: sync::get_str(doc, "note"),
            sync: meta,
        })
    }
}
