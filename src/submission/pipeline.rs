use std::net::IpAddr;

use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::db;
use crate::mapper;
use crate::models::{Entry, Feed, Form};
use crate::state::SharedState;

use super::metadata;

#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub entry_id: i64,
    pub deliveries: Vec<FeedOutcome>,
}

#[derive(Debug, Serialize)]
pub struct FeedOutcome {
    pub feed_id: i64,
    pub feed_name: String,
    pub status: String,
    pub response_code: Option<i32>,
    pub message: String,
}

/// Store a submission and deliver it to every feed that fires automatically.
/// Delivery is synchronous and single-attempt; each attempt gets a log row
/// whatever the outcome.
pub async fn run(
    state: &SharedState,
    form: &Form,
    headers: &HeaderMap,
    peer_addr: Option<IpAddr>,
    field_values: Map<String, Value>,
) -> Result<PipelineResult, String> {
    let meta = metadata::extract(headers, peer_addr, &state.config.trusted_proxies);

    let entry = db::entries::create(
        &state.pool,
        form.id,
        &field_values,
        &meta.source_url,
        &meta.user_agent,
        &meta.ip,
    )
    .await
    .map_err(|e| format!("Failed to store entry: {e}"))?;

    let feeds: Vec<Feed> = db::feeds::list_active_by_form(&state.pool, form.id)
        .await
        .map_err(|e| format!("Failed to load feeds: {e}"))?
        .into_iter()
        .filter(Feed::fires_on_submission)
        .collect();

    let deliveries = deliver_all(state, form, &entry, &feeds).await;

    Ok(PipelineResult {
        entry_id: entry.id,
        deliveries,
    })
}

/// Map the entry once per feed and post it, recording every attempt. Shared
/// by automatic delivery and manual resend.
pub async fn deliver_all(
    state: &SharedState,
    form: &Form,
    entry: &Entry,
    feeds: &[Feed],
) -> Vec<FeedOutcome> {
    let mut outcomes = Vec::with_capacity(feeds.len());
    if feeds.is_empty() {
        return outcomes;
    }

    let settings = db::settings::get_mapper(&state.pool).await.unwrap_or_default();
    let payload = mapper::map_entry(form, entry, &settings);

    for feed in feeds {
        let outcome = state.sender.deliver(feed, &payload).await;

        if let Err(e) = db::delivery_log::create(&state.pool, entry.id, feed, &outcome).await {
            tracing::error!("Failed to record delivery log for feed {}: {e}", feed.id);
        }

        match outcome.response_code {
            Some(code) => tracing::info!(
                "Delivered entry {} to feed {} ({}): {} {}",
                entry.id,
                feed.id,
                feed.name,
                outcome.status.as_str(),
                code
            ),
            None => tracing::warn!(
                "Delivery of entry {} to feed {} ({}) failed: {}",
                entry.id,
                feed.id,
                feed.name,
                outcome.message
            ),
        }

        outcomes.push(FeedOutcome {
            feed_id: feed.id,
            feed_name: feed.name.clone(),
            status: outcome.status.as_str().to_string(),
            response_code: outcome.response_code,
            message: outcome.message,
        });
    }

    outcomes
}
