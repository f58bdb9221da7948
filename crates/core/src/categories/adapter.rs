//! Document codec for categories.

use serde_json::{json, Value};

use crate::categories::{Category, CategoryKind};
use crate::errors::Result;
use crate::sync::{self, Document, EntityAdapter, SyncMeta};

pub struct CategoryAdapter;

fn kind_to_tag(kind: CategoryKind) -> Value {
    serde_json::to_value(kind).unwrap_or_else(|_| Value::String("unknown".into()))
}

fn kind_from_tag(doc: &Document) -> CategoryKind {
    doc.get("kind")
        .cloned()
        .and_then(|tag| serde_json::from_value(tag).ok())
        .unwrap_or_default()
}

impl EntityAdapter for CategoryAdapter {
    type Record = Category;

    fn collection() -> &'static str {
        "categories"
    }

    fn to_document(record: &Category) -> Document {
        let mut doc = Document::new();
        doc.insert("name".into(), Value::String(record.name.clone()));
        doc.insert("kind".into(), kind_to_tag(record.kind));
        doc.insert("icon".into(), Value::String(record.icon.clone()));
        doc.insert("updatedAt".into(), json!(record.sync.updated_at.to_rfc3339()));
        doc
    }

    fn from_document(owner_id: &str, doc: &Document) -> Result<Category> {
        let name = sync::require_str(doc, "name")?;
        let mut meta = SyncMeta::new(owner_id);
        meta.updated_at = sync::get_datetime_or_now(doc, "updatedAt");
        Ok(Category {
            name,
            kind: kind_from_tag(doc),
            icon: sync::get_str(doc, "icon"),
            sync: meta,
        })
    }
}
