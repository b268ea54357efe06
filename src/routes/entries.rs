use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::mapper;
use crate::models::{Entry, Feed};
use crate::state::SharedState;
use crate::submission::pipeline;

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ResendRequest {
    /// Restrict the resend to these feeds; all active feeds of the entry's
    /// form when omitted.
    #[serde(default)]
    pub feed_ids: Option<Vec<i64>>,
}

pub async fn list(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(form_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::forms::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let list_params = db::entries::ListParams {
        form_id,
        limit: per_page,
        offset,
        search: params.search.clone(),
    };

    let entries = db::entries::list(&state.pool, &list_params).await?;
    let total = db::entries::count(&state.pool, form_id, params.search.as_deref()).await?;

    Ok(Json(json!({
        "entries": entries,
        "total": total,
        "page": page,
        "per_page": per_page,
        "total_pages": (total as f64 / per_page as f64).ceil() as i64,
    })))
}

pub async fn get(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Entry>, AppError> {
    let entry = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;
    Ok(Json(entry))
}

/// Preview the webhook payload this entry produces under the current mapper
/// settings, without sending anything.
pub async fn payload(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let entry = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;
    let form = db::forms::find_by_id(&state.pool, entry.form_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let settings = db::settings::get_mapper(&state.pool).await?;
    let payload = mapper::map_entry(&form, &entry, &settings);

    Ok(Json(serde_json::Value::Object(payload)))
}

/// Manually redeliver an entry. Unlike automatic delivery this ignores the
/// feed event setting, so a misconfigured feed can still be exercised by
/// hand. Every attempt is logged; there is no duplicate-send protection.
pub async fn resend(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<ResendRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let entry = db::entries::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;
    let form = db::forms::find_by_id(&state.pool, entry.form_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let feeds: Vec<Feed> = match req.feed_ids {
        Some(ids) => {
            let mut selected = Vec::with_capacity(ids.len());
            for feed_id in ids {
                let feed = db::feeds::find_by_id(&state.pool, feed_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Feed {feed_id} not found"))
                    })?;
                if feed.form_id != form.id {
                    return Err(AppError::BadRequest(format!(
                        "Feed {feed_id} does not belong to form {}",
                        form.id
                    )));
                }
                selected.push(feed);
            }
            selected
        }
        None => db::feeds::list_active_by_form(&state.pool, form.id).await?,
    };

    if feeds.is_empty() {
        return Err(AppError::BadRequest(
            "No feeds to deliver to".to_string(),
        ));
    }

    let results = pipeline::deliver_all(&state, &form, &entry, &feeds).await;

    Ok(Json(json!({
        "entry_id": entry.id,
        "results": results,
    })))
}
