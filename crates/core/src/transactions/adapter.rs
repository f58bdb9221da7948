//! Document codec for transactions.

use serde_json::{json, Value};

use crate::errors::Result;
use crate::sync::{self, Document, EntityAdapter, SyncMeta};
use crate::transactions::{Transaction, TransactionKind};

pub struct TransactionAdapter;

fn kind_from_tag(doc: &Document) -> TransactionKind {
    doc.get("kind")
        .cloned()
        .and_then(|tag| serde_json::from_value(tag).ok())
        .unwrap_or_default()
}

impl EntityAdapter for TransactionAdapter {
    type Record = Transaction;

    fn collection() -> &'static str {
        "transactions"
    }

    fn to_document(record: &Transaction) -> Document {
        let mut doc = Document::new();
        doc.insert("id".into(), Value::String(record.id.clone()));
        doc.insert("amount".into(), json!(record.amount));
        doc.insert("category".into(), Value::String(record.category.clone()));
        doc.insert(
            "kind".into(),
            serde_json::to_value(record.kind).unwrap_or_else(|_| Value::String("unknown".into())),
        );
        doc.insert("date".into(), json!(record.date.to_rfc3339()));
        doc.insert("note".into(), Value::String(record.note.clone()));
        doc.insert("updatedAt".into(), json!(record.sync.updated_at.to_rfc3339()));
        doc
    }

    fn from_document(owner_id: &str, doc: &Document) -> Result<Transaction> {
        let id = sync::require_str(doc, "id")?;
        let mut meta = SyncMeta::new(owner_id);
        meta.updated_at = sync::get_datetime_or_now(doc, "updatedAt");
        Ok(Transaction {
            id,
            amount: sync::get_f64(doc, "amount"),
            category: sync::get_str(doc, "category"),
            kind: kind_from_tag(doc),
            date: sync::get_datetime_or_now(doc, "date"),
            note: sync::get_str(doc, "note"),
            sync: meta,
        })
    }
}
