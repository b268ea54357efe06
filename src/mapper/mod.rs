//! Turns a stored entry into the webhook payload: numeric field ids become
//! human-readable keys, composite fields become structured sub-objects, and
//! the configured filtering policy decides what survives.

pub mod label;
pub mod record;
pub mod settings;
pub mod value;

use std::collections::BTreeSet;

use serde_json::{json, Map, Value};

use crate::models::{Entry, Form};

use record::{EntryRecord, META_KEYS};
use settings::MapperSettings;
use value::FieldValue;

/// Build the payload for one entry. The result replaces whatever body the
/// caller had; it is never merged. Pure: identical inputs serialize to
/// byte-identical JSON.
pub fn map_entry(form: &Form, entry: &Entry, settings: &MapperSettings) -> Map<String, Value> {
    let record = EntryRecord::new(&entry.field_values);
    let mut out = Map::new();

    out.insert("form_id".to_string(), json!(form.id));
    out.insert("form_title".to_string(), json!(form.title));
    out.insert("entry_id".to_string(), json!(entry.id));
    out.insert(
        "date_created".to_string(),
        json!(entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    );

    let merged: BTreeSet<u32> = settings.merged_field_ids().collect();

    // Record keys a schema field accounts for, whether or not it is emitted.
    let mut covered: BTreeSet<String> = BTreeSet::new();
    for field in form.fields.iter() {
        covered.insert(field.id.to_string());
        for input in field.inputs.iter().flatten() {
            covered.insert(input.id.clone());
        }
    }
    for id in &merged {
        covered.insert(id.to_string());
    }

    for field in form.fields.iter() {
        // Fields folded into another field's value are not emitted on their own.
        if merged.contains(&field.id) {
            continue;
        }

        let key = unique_key(&out, label::derive(field), &field.id.to_string());

        if !settings.includes(field, &key) {
            continue;
        }

        let computed = value::extract(field, &record, settings)
            .unwrap_or_else(|| value::fallback(field, &record));

        if settings.include_empty || !computed.is_empty() || settings.is_required(field, &key) {
            out.insert(key, computed.into_json());
        }
    }

    sweep_stray_keys(&record, &covered, &mut out);

    out.insert("source_url".to_string(), json!(entry.source_url));
    out.insert("user_agent".to_string(), json!(entry.user_agent));
    out.insert("ip_address".to_string(), json!(entry.ip));

    out
}

/// Second pass: numeric record keys no schema field accounts for still make
/// it into the payload as `field_<id>`.
fn sweep_stray_keys(
    record: &EntryRecord<'_>,
    covered: &BTreeSet<String>,
    out: &mut Map<String, Value>,
) {
    let mut processed: BTreeSet<&str> = BTreeSet::new();

    for key in record.keys() {
        if key.contains('.') {
            continue;
        }
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if META_KEYS.contains(&key.as_str()) || covered.contains(key) {
            continue;
        }
        if !processed.insert(key.as_str()) {
            continue;
        }

        let out_key = unique_key(out, format!("field_{key}"), key);
        out.insert(out_key, FieldValue::Text(record.get(key)).into_json());
    }
}

/// Output keys are unique: a collision gets the field id appended.
fn unique_key(out: &Map<String, Value>, base: String, field_id: &str) -> String {
    if out.contains_key(&base) {
        format!("{base}_{field_id}")
    } else {
        base
    }
}
