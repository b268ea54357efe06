use serde_json::{Map, Value};

use crate::models::Feed;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const REDIRECT_LIMIT: usize = 3;
const RESPONSE_EXCERPT_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Success,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Success => "success",
            DeliveryStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub status: DeliveryStatus,
    pub response_code: Option<i32>,
    pub message: String,
}

/// Posts mapped payloads to webhook feeds. One attempt per call: transport
/// errors and non-2xx responses are both a failed outcome, never an `Err`.
pub struct Sender {
    client: reqwest::Client,
}

impl Sender {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .redirect(reqwest::redirect::Policy::limited(REDIRECT_LIMIT))
                .build()
                .expect("Failed to build reqwest client"),
        }
    }

    pub async fn deliver(&self, feed: &Feed, payload: &Map<String, Value>) -> DeliveryOutcome {
        let resp = match self
            .client
            .post(&feed.url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return DeliveryOutcome {
                    status: DeliveryStatus::Failed,
                    response_code: None,
                    message: truncate(&format!("Webhook request failed: {e}")),
                };
            }
        };

        let status_code = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        let status = if (200..300).contains(&status_code) {
            DeliveryStatus::Success
        } else {
            DeliveryStatus::Failed
        };

        DeliveryOutcome {
            status,
            response_code: Some(status_code as i32),
            message: truncate(&body),
        }
    }
}

impl Default for Sender {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(s: &str) -> String {
    s.chars().take(RESPONSE_EXCERPT_LEN).collect()
}
