use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::AuthAdmin;
use crate::db;
use crate::db::delivery_log::{LogFilter, PAGE_SIZE};
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub form_id: Option<i64>,
    pub search: Option<String>,
    pub page: Option<i64>,
}

pub async fn list(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(status) = params.status.as_deref() {
        if status != "success" && status != "failed" {
            return Err(AppError::BadRequest(
                "status must be 'success' or 'failed'".to_string(),
            ));
        }
    }

    let filter = LogFilter {
        status: params.status,
        form_id: params.form_id,
        search: params.search,
    };

    let page = params.page.unwrap_or(1).max(1);
    let offset = (page - 1) * PAGE_SIZE;

    let logs = db::delivery_log::list(&state.pool, &filter, offset).await?;
    let total = db::delivery_log::count(&state.pool, &filter).await?;

    Ok(Json(json!({
        "logs": logs,
        "total": total,
        "page": page,
        "per_page": PAGE_SIZE,
        "total_pages": (total as f64 / PAGE_SIZE as f64).ceil() as i64,
    })))
}
