//! Document codec for budgets.

use serde_json::{json, Value};

use crate::budgets::Budget;
use crate::errors::Result;
use crate::sync::{self, Document, EntityAdapter, SyncMeta};

pub struct BudgetAdapter;

impl EntityAdapter for BudgetAdapter {
    type Record = Budget;

    fn collection() -> &'static str {
        "budgets"
    }

    fn to_document(record: &Budget) -> Document {
        let mut doc = Document::new();
        doc.insert("category".into(), Value::String(record.category.clone()));
        doc.insert("month".into(), json!(record.month));
        doc.insert("year".into(), json!(record.year));
        doc.insert("amount".into(), json!(record.amount));
        doc.insert("spent".into(), json!(record.spent));
        doc.insert("updatedAt".into(), json!(record.sync.updated_at.to_rfc3339()));
        doc
    }

    fn from_document(owner_id: &str, doc: &Document) -> Result<Budget> {
        // Month and year are part of the identity but still default to 0 on
        // absence; the category is the only unrecoverable piece of the key.
        let category = sync::require_str(doc, "category")?;
        let mut meta = SyncMeta::new(owner_id);
        meta.updated_at = sync::get_datetime_or_now(doc, "updatedAt");
        Ok(Budget {
            category,
            month: sync::get_u32(doc, "month"),
            year: sync::get_i32(doc, "year"),
            amount: sync::get_f64(doc, "amount"),
            spent: sync::get_f64(doc, "spent"),
            sync: meta,
        })
    }
}
