use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::models::Feed;
use crate::state::SharedState;

/// Why isn't automatic delivery firing? The usual answers, in one report:
/// feeds with no event configured, feeds switched off, and forms with no
/// feeds at all.
pub async fn report(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let missing_event = db::feeds::list_missing_event(&state.pool).await?;
    let inactive = db::feeds::list_inactive(&state.pool).await?;
    let forms_without_feeds = db::forms::ids_without_feeds(&state.pool).await?;
    let settings = db::settings::get_mapper(&state.pool).await?;

    let summarize = |feeds: &[Feed]| -> Vec<serde_json::Value> {
        feeds
            .iter()
            .map(|f| {
                json!({
                    "feed_id": f.id,
                    "form_id": f.form_id,
                    "name": f.name,
                    "url": f.url,
                    "event": f.event,
                    "active": f.active,
                })
            })
            .collect()
    };

    Ok(Json(json!({
        "feeds_missing_event": summarize(&missing_event),
        "inactive_feeds": summarize(&inactive),
        "forms_without_feeds": forms_without_feeds,
        "filter_mode": settings.mode,
        "include_empty": settings.include_empty,
    })))
}

/// Patch feeds with no event so they fire on form submissions again.
pub async fn repair(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let repaired = db::feeds::repair_missing_event(&state.pool).await?;
    if repaired > 0 {
        tracing::info!("Diagnostics repair: set event on {repaired} feed(s)");
    }
    Ok(Json(json!({ "repaired": repaired })))
}
