use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The event tag a feed must carry for automatic delivery to fire.
pub const EVENT_FORM_SUBMISSION: &str = "form_submission";

/// A webhook destination attached to a form.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,
    pub form_id: i64,
    pub name: String,
    pub url: String,
    pub event: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feed {
    /// Whether a submission should be delivered to this feed automatically.
    /// Feeds without the form_submission event are configured but never fire;
    /// the diagnostics report surfaces them.
    pub fn fires_on_submission(&self) -> bool {
        self.active && self.event.as_deref() == Some(EVENT_FORM_SUBMISSION)
    }
}
