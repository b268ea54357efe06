use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored form submission. `field_values` is the flat record keyed by
/// `"<field_id>"` or `"<field_id>.<sub_index>"`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub form_id: i64,
    pub field_values: sqlx::types::Json<Map<String, Value>>,
    pub source_url: String,
    pub user_agent: String,
    pub ip: String,
    pub created_at: DateTime<Utc>,
}
