use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::models::Feed;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct FeedRequest {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

fn validate(req: &FeedRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if !req.url.starts_with("http://") && !req.url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "URL must be http or https".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_by_form(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(form_id): Path<i64>,
) -> Result<Json<Vec<Feed>>, AppError> {
    db::forms::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    Ok(Json(db::feeds::list_by_form(&state.pool, form_id).await?))
}

pub async fn create(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(form_id): Path<i64>,
    Json(req): Json<FeedRequest>,
) -> Result<Json<Feed>, AppError> {
    validate(&req)?;
    db::forms::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let feed = db::feeds::create(
        &state.pool,
        form_id,
        req.name.trim(),
        req.url.trim(),
        req.event.as_deref(),
        req.active,
    )
    .await?;
    Ok(Json(feed))
}

pub async fn get(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Feed>, AppError> {
    let feed = db::feeds::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Feed not found".to_string()))?;
    Ok(Json(feed))
}

pub async fn update(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<FeedRequest>,
) -> Result<Json<Feed>, AppError> {
    validate(&req)?;
    let feed = db::feeds::update(
        &state.pool,
        id,
        req.name.trim(),
        req.url.trim(),
        req.event.as_deref(),
        req.active,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Feed not found".to_string()))?;
    Ok(Json(feed))
}

pub async fn delete(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::feeds::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Feed not found".to_string()));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}
