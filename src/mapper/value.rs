use serde_json::{Map, Value};

use crate::models::{Field, FieldType, SubInput};

use super::label;
use super::record::EntryRecord;
use super::settings::MapperSettings;

/// A computed field value, tagged by shape. `Selections` (checkbox picks)
/// render as one comma-joined string; `Items` (list rows) stay an array.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Group(Vec<(String, String)>),
    Selections(Vec<String>),
    Items(Vec<String>),
}

impl FieldValue {
    /// Recursive emptiness: empty string, empty or all-empty collection, or
    /// a group whose values are all empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Group(parts) => parts.iter().all(|(_, v)| v.is_empty()),
            FieldValue::Selections(items) | FieldValue::Items(items) => {
                items.iter().all(|v| v.is_empty())
            }
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Group(parts) => {
                let mut map = Map::new();
                for (key, value) in parts {
                    map.insert(key, Value::String(value));
                }
                Value::Object(map)
            }
            FieldValue::Selections(items) => Value::String(items.join(", ")),
            FieldValue::Items(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
        }
    }
}

/// Compute a field's value from the record. Returns `None` when the record
/// holds nothing for the field at all, in which case the caller applies the
/// fallback chain.
pub fn extract(
    field: &Field,
    record: &EntryRecord<'_>,
    settings: &MapperSettings,
) -> Option<FieldValue> {
    match field.field_type {
        FieldType::Name => Some(extract_name(field, record)),
        FieldType::Address => Some(extract_address(field, record)),
        FieldType::Date | FieldType::Time => Some(extract_dated(field, record)),
        FieldType::Checkbox => Some(extract_checkbox(field, record, settings)),
        FieldType::List => extract_list(field, record),
        FieldType::Text => extract_plain(field, record),
    }
}

/// Fallback chain for a field with no determined value, first match wins:
/// direct scalar, first non-empty sub-input value, empty string.
pub fn fallback(field: &Field, record: &EntryRecord<'_>) -> FieldValue {
    let scalar = record.scalar(field.id);
    if !scalar.is_empty() {
        return FieldValue::Text(scalar);
    }

    let first_sub = field
        .inputs
        .iter()
        .flatten()
        .map(|input| record.get(&input.id))
        .find(|v| !v.is_empty());

    FieldValue::Text(first_sub.unwrap_or_default())
}

/// Name sub-values live at fixed sub-indices: 2 prefix, 3 first, 4 middle,
/// 6 last, 8 suffix. `full` is added only when the composite value exists.
fn extract_name(field: &Field, record: &EntryRecord<'_>) -> FieldValue {
    let mut parts = vec![
        ("prefix".to_string(), record.sub(field.id, 2)),
        ("first".to_string(), record.sub(field.id, 3)),
        ("middle".to_string(), record.sub(field.id, 4)),
        ("last".to_string(), record.sub(field.id, 6)),
        ("suffix".to_string(), record.sub(field.id, 8)),
    ];

    let full = record.scalar(field.id);
    if !full.is_empty() {
        parts.push(("full".to_string(), full));
    }

    FieldValue::Group(parts)
}

fn extract_address(field: &Field, record: &EntryRecord<'_>) -> FieldValue {
    FieldValue::Group(vec![
        ("street".to_string(), record.sub(field.id, 1)),
        ("street2".to_string(), record.sub(field.id, 2)),
        ("city".to_string(), record.sub(field.id, 3)),
        ("state".to_string(), record.sub(field.id, 4)),
        ("zip".to_string(), record.sub(field.id, 5)),
        ("country".to_string(), record.sub(field.id, 6)),
    ])
}

/// Date and time fields: with sub-inputs, one entry per input keyed by its
/// sanitized label; without, the raw scalar.
fn extract_dated(field: &Field, record: &EntryRecord<'_>) -> FieldValue {
    match &field.inputs {
        Some(inputs) => FieldValue::Group(sub_input_group(inputs, record)),
        None => FieldValue::Text(record.scalar(field.id)),
    }
}

fn extract_checkbox(
    field: &Field,
    record: &EntryRecord<'_>,
    settings: &MapperSettings,
) -> FieldValue {
    let mut selected: Vec<String> = field
        .inputs
        .iter()
        .flatten()
        .map(|input| record.get(&input.id))
        .filter(|v| !v.is_empty())
        .collect();

    // Fold in the free-text "other" fields configured for this checkbox.
    for merged_id in settings.combined_for(field.id) {
        let value = record.scalar(*merged_id).trim().to_string();
        if !value.is_empty() {
            selected.push(value);
        }
    }

    FieldValue::Selections(selected)
}

/// List fields store their rows as a serialized array in the direct scalar.
fn extract_list(field: &Field, record: &EntryRecord<'_>) -> Option<FieldValue> {
    let raw = record.raw(&field.id.to_string())?;

    match raw {
        Value::Array(items) => Some(FieldValue::Items(items.iter().map(stringify).collect())),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => {
                Some(FieldValue::Items(items.iter().map(stringify).collect()))
            }
            _ => Some(FieldValue::Text(s.clone())),
        },
        other => Some(FieldValue::Text(stringify(other))),
    }
}

/// Plain fields (and unknown types): the direct scalar, unless the field has
/// sub-inputs. More than one sub-input emits a group; exactly one uses its
/// value directly. A field whose sub-values are all empty but whose scalar is
/// not falls back to the scalar.
fn extract_plain(field: &Field, record: &EntryRecord<'_>) -> Option<FieldValue> {
    let scalar = record.scalar(field.id);

    let value = match &field.inputs {
        Some(inputs) if inputs.len() > 1 => FieldValue::Group(sub_input_group(inputs, record)),
        Some(inputs) if inputs.len() == 1 => FieldValue::Text(record.get(&inputs[0].id)),
        _ => {
            if record.raw(&field.id.to_string()).is_none() {
                return None;
            }
            return Some(FieldValue::Text(scalar));
        }
    };

    if value.is_empty() && !scalar.is_empty() {
        return Some(FieldValue::Text(scalar));
    }
    Some(value)
}

fn sub_input_group(inputs: &[SubInput], record: &EntryRecord<'_>) -> Vec<(String, String)> {
    inputs
        .iter()
        .map(|input| {
            (
                label::sub_input_key(&input.id, input.label.as_deref()),
                record.get(&input.id),
            )
        })
        .collect()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
