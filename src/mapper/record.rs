use serde_json::{Map, Value};

/// Metadata keys of the flat submission record. These are never mapped as
/// fields and are skipped by the stray-key sweep.
pub const META_KEYS: &[&str] = &[
    "id",
    "form_id",
    "date_created",
    "source_url",
    "user_agent",
    "ip",
    "created_by",
    "status",
    "currency",
    "payment_status",
    "payment_date",
    "payment_amount",
    "payment_method",
    "transaction_id",
    "is_fulfilled",
];

/// Read-only view over the flat dotted-key record of an entry. Every accessor
/// defaults to the empty string; the mapper never fails on missing or
/// malformed keys.
pub struct EntryRecord<'a> {
    values: &'a Map<String, Value>,
}

impl<'a> EntryRecord<'a> {
    pub fn new(values: &'a Map<String, Value>) -> Self {
        Self { values }
    }

    /// The raw stored value at a key, if present.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.values.get(key)
    }

    /// The value at a key coerced to a string, `""` when absent.
    pub fn get(&self, key: &str) -> String {
        self.values.get(key).map(coerce).unwrap_or_default()
    }

    /// The direct (composite) value of a field: key `"<field_id>"`.
    pub fn scalar(&self, field_id: u32) -> String {
        self.get(&field_id.to_string())
    }

    /// A composite sub-value: key `"<field_id>.<sub_index>"`.
    pub fn sub(&self, field_id: u32, sub_index: u32) -> String {
        self.get(&format!("{field_id}.{sub_index}"))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a String> {
        self.values.keys()
    }
}

/// Scalar coercion for record values. Submissions normally carry strings,
/// but JSON ingest may hand us numbers or booleans.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
