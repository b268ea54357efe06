use std::net::IpAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

/// Accept one form submission: store it and deliver it synchronously to
/// every feed configured to fire.
pub async fn ingest(
    State(state): State<SharedState>,
    Path(form_id): Path<i64>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Response> {
    let form = db::forms::find_by_id(&state.pool, form_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load form {form_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal error"})),
            )
                .into_response()
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Form not found"})),
            )
                .into_response()
        })?;

    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());

    let field_values = parser::parse_body(content_type, &body).map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(json!({"error": e}))).into_response()
    })?;

    let peer_ip: Option<IpAddr> = Some(addr.ip());

    let result = pipeline::run(&state, &form, &headers, peer_ip, field_values)
        .await
        .map_err(|e| {
            tracing::error!("Submission pipeline failed for form {form_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal error"})),
            )
                .into_response()
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "created",
            "entry_id": result.entry_id,
            "deliveries": result.deliveries,
        })),
    )
        .into_response())
}
