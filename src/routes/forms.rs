use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::models::{Field, Form};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct FormRequest {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

pub async fn list(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Form>>, AppError> {
    Ok(Json(db::forms::list(&state.pool).await?))
}

pub async fn create(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(req): Json<FormRequest>,
) -> Result<Json<Form>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    let form = db::forms::create(&state.pool, req.title.trim(), &req.fields).await?;
    Ok(Json(form))
}

pub async fn get(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Form>, AppError> {
    let form = db::forms::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    Ok(Json(form))
}

pub async fn update(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<FormRequest>,
) -> Result<Json<Form>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    let form = db::forms::update(&state.pool, id, req.title.trim(), &req.fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    Ok(Json(form))
}

pub async fn delete(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::forms::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Form not found".to_string()));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}
