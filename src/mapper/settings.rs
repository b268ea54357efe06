use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Field;

use super::label;

/// The persisted filter configuration for the mapper. Loaded once by the
/// caller and passed in by reference; the mapper itself never touches
/// storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapperSettings {
    #[serde(default)]
    pub mode: FilterMode,
    /// Labels matched by whitelist/blacklist modes.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub include_empty: bool,
    /// Labels always included even when their value is empty.
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Owning field id -> ids of fields folded into its value.
    #[serde(default)]
    pub combined_fields: BTreeMap<u32, Vec<u32>>,
}

/// Inclusion policy. An unrecognized mode deserializes to `All`, so a stale
/// or hand-edited settings blob degrades to passing everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Whitelist,
    Blacklist,
    AdminLabelOnly,
}

impl<'de> Deserialize<'de> for FilterMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mode = String::deserialize(deserializer)?;
        Ok(match mode.as_str() {
            "whitelist" => FilterMode::Whitelist,
            "blacklist" => FilterMode::Blacklist,
            "admin_label_only" => FilterMode::AdminLabelOnly,
            _ => FilterMode::All,
        })
    }
}

impl MapperSettings {
    /// Ids of fields that are folded into another field's value and therefore
    /// never emitted on their own.
    pub fn merged_field_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.combined_fields.values().flatten().copied()
    }

    /// Fields whose values merge into the given field.
    pub fn combined_for(&self, field_id: u32) -> &[u32] {
        self.combined_fields
            .get(&field_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a field passes the inclusion policy. Whitelist and blacklist
    /// match any of the field's label forms, so an entry works whether the
    /// admin typed the display label or the admin label.
    pub fn includes(&self, field: &Field, final_label: &str) -> bool {
        match self.mode {
            FilterMode::All => true,
            FilterMode::Whitelist => self.matches_any(field, final_label),
            FilterMode::Blacklist => !self.matches_any(field, final_label),
            FilterMode::AdminLabelOnly => {
                field.admin_label.as_deref().is_some_and(|l| !l.is_empty())
            }
        }
    }

    /// Whether a field is always included regardless of emptiness.
    pub fn is_required(&self, field: &Field, final_label: &str) -> bool {
        self.required_fields.iter().any(|required| {
            required == final_label || label::candidates(field).iter().any(|c| c == required)
        })
    }

    fn matches_any(&self, field: &Field, final_label: &str) -> bool {
        self.fields.iter().any(|entry| {
            entry == final_label || label::candidates(field).iter().any(|c| c == entry)
        })
    }
}
