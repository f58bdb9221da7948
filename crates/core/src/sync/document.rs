//! Remote document shape and defensive field readers.
//!
//! Every field read out of a pulled document must tolerate absence or a
//! mistyped value: a single bad field substitutes a type-appropriate default
//! instead of failing the whole pull.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::Error;

/// A remote document: the JSON object stored per key in an owner's collection.
pub type Document = serde_json::Map<String, Value>;

/// String field, defaulting to empty.
pub fn get_str(doc: &Document, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Numeric field, defaulting to 0.0. Integer-typed values are widened.
pub fn get_f64(doc: &Document, key: &str) -> f64 {
    doc.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Unsigned integer field, defaulting to 0.
pub fn get_u32(doc: &Document, key: &str) -> u32 {
    doc.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Signed integer field, defaulting to 0.
pub fn get_i32(doc: &Document, key: &str) -> i32 {
    doc.get(key)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0)
}

/// RFC3339 timestamp field; absent or unparseable values map to None.
pub fn get_datetime(doc: &Document, key: &str) -> Option<DateTime<Utc>> {
    doc.get(key)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// RFC3339 timestamp field, defaulting to the pull time.
pub fn get_datetime_or_now(doc: &Document, key: &str) -> DateTime<Utc> {
    get_datetime(doc, key).unwrap_or_else(Utc::now)
}

/// Identity field: must be present and non-empty, otherwise the document
/// cannot be keyed locally and is skipped by the pull.
pub fn require_str(doc: &Document, key: &str) -> Result<String, Error> {
    let value = get_str(doc, key);
    if value.is_empty() {
        return Err(Error::InvalidRecord(format!(
            "document is missing identity field '{key}'"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().expect("object").clone()
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let doc = doc(json!({ "amount": 12.5 }));
        assert_eq!(get_f64(&doc, "amount"), 12.5);
        assert_eq!(get_f64(&doc, "spent"), 0.0);
        assert_eq!(get_str(&doc, "notes"), "");
        assert_eq!(get_u32(&doc, "month"), 0);
        assert_eq!(get_i32(&doc, "year"), 0);
        assert!(get_datetime(&doc, "dueDate").is_none());
    }

    #[test]
    fn mistyped_fields_fall_back_to_defaults() {
        let doc = doc(json!({ "amount": "lots", "month": -3, "date": 42 }));
        assert_eq!(get_f64(&doc, "amount"), 0.0);
        assert_eq!(get_u32(&doc, "month"), 0);
        assert!(get_datetime(&doc, "date").is_none());
    }

    #[test]
    fn integer_amounts_widen_to_f64() {
        let doc = doc(json!({ "amount": 1000 }));
        assert_eq!(get_f64(&doc, "amount"), 1000.0);
    }

    #[test]
    fn datetime_parses_rfc3339() {
        let doc = doc(json!({ "date": "2024-03-01T10:30:00Z" }));
        let parsed = get_datetime(&doc, "date").expect("parses");
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T10:30:00+00:00");
    }

    #[test]
    fn require_str_rejects_missing_or_empty_identity() {
        let empty = doc(json!({ "id": "" }));
        assert!(require_str(&empty, "id").is_err());
        let present = doc(json!({ "id": "txn-1" }));
        assert_eq!(require_str(&present, "id").expect("present"), "txn-1");
    }
}
