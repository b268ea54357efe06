use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One delivery attempt. Rows are insert-only; there is no update or delete
/// path.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct DeliveryLog {
    pub id: i64,
    pub entry_id: i64,
    pub form_id: i64,
    pub feed_id: i64,
    pub feed_name: String,
    pub feed_url: String,
    pub status: String,
    pub response_code: Option<i32>,
    pub response_message: String,
    pub created_at: DateTime<Utc>,
}
