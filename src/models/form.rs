use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A form definition: a stable numeric id, a title, and an ordered field schema.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Form {
    pub id: i64,
    pub title: String,
    pub fields: sqlx::types::Json<Vec<Field>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One input definition within a form. Composite types (name, address, date,
/// time, checkbox) carry sub-inputs addressed as `"<field_id>.<sub_index>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: u32,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub admin_label: Option<String>,
    #[serde(default)]
    pub inputs: Option<Vec<SubInput>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubInput {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Field type tags. Anything unrecognized deserializes to `Text` and is
/// handled as a plain field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Name,
    Address,
    Date,
    Time,
    Checkbox,
    List,
    Text,
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "name" => FieldType::Name,
            "address" => FieldType::Address,
            "date" => FieldType::Date,
            "time" => FieldType::Time,
            "checkbox" => FieldType::Checkbox,
            "list" => FieldType::List,
            _ => FieldType::Text,
        })
    }
}

impl FieldType {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldType::Name => "name",
            FieldType::Address => "address",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Checkbox => "checkbox",
            FieldType::List => "list",
            FieldType::Text => "text",
        }
    }
}
