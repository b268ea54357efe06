use std::sync::LazyLock;

use regex::Regex;

use crate::models::Field;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

/// Normalize a human label into a payload key: strip markup, spaces become
/// underscores, drop anything outside `[A-Za-z0-9_-]`, lowercase, and prefix
/// `field_` when the result would start with a digit.
pub fn sanitize(label: &str) -> String {
    let stripped = MARKUP.replace_all(label, "");
    let underscored = stripped.replace(' ', "_");
    let cleaned = DISALLOWED.replace_all(&underscored, "").to_lowercase();

    if cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("field_{cleaned}")
    } else {
        cleaned
    }
}

/// Derive the payload key for a field, first match wins: sanitized admin
/// label, sanitized display label, then `"<type>_<id>"`.
pub fn derive(field: &Field) -> String {
    candidates(field)
        .into_iter()
        .next()
        .unwrap_or_else(|| fallback(field))
}

/// The label forms a field is known by, in precedence order. Used both for
/// key derivation and for matching against whitelist/blacklist entries.
pub fn candidates(field: &Field) -> Vec<String> {
    let mut out = Vec::new();
    for source in [field.admin_label.as_deref(), field.label.as_deref()] {
        if let Some(raw) = source {
            let sanitized = sanitize(raw);
            if !sanitized.is_empty() && !out.contains(&sanitized) {
                out.push(sanitized);
            }
        }
    }
    out
}

fn fallback(field: &Field) -> String {
    format!("{}_{}", field.field_type.tag(), field.id)
}

/// Key for a composite sub-input: its sanitized label, or `input_<id>` with
/// the dot flattened when the label is missing.
pub fn sub_input_key(input_id: &str, label: Option<&str>) -> String {
    if let Some(raw) = label {
        let sanitized = sanitize(raw);
        if !sanitized.is_empty() {
            return sanitized;
        }
    }
    format!("input_{}", input_id.replace('.', "_"))
}
