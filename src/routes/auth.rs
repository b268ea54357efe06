use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{jwt, password};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bootstrap registration: the first admin can self-register, everyone after
/// that is rejected.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if db::admins::count(&state.pool).await? > 0 {
        return Err(AppError::Forbidden(
            "Registration is disabled".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email".to_string()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let hash = password::hash(&req.password).map_err(AppError::Internal)?;
    let admin = db::admins::create(&state.pool, &email, req.name.trim(), &hash).await?;

    tracing::info!("Bootstrap admin registered: {}", admin.email);

    let token = jwt::encode_token(&jwt::Claims::new(admin.id), &state.config.jwt_secret)
        .map_err(AppError::Internal)?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
    })))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = req.email.trim().to_lowercase();

    let admin = db::admins::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid =
        password::verify(&req.password, &admin.password_hash).map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = jwt::encode_token(&jwt::Claims::new(admin.id), &state.config.jwt_secret)
        .map_err(AppError::Internal)?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
    })))
}
