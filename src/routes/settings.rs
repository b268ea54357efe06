use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::error::AppError;
use crate::mapper::settings::MapperSettings;
use crate::state::SharedState;

pub async fn get(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<MapperSettings>, AppError> {
    Ok(Json(db::settings::get_mapper(&state.pool).await?))
}

pub async fn update(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Json(settings): Json<MapperSettings>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::settings::put_mapper(&state.pool, &settings).await?;
    tracing::info!("Mapper settings updated (mode {:?})", settings.mode);
    Ok(Json(json!({ "message": "Saved" })))
}
