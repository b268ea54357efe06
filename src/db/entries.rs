use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::models::Entry;

pub async fn create(
    pool: &PgPool,
    form_id: i64,
    field_values: &Map<String, Value>,
    source_url: &str,
    user_agent: &str,
    ip: &str,
) -> Result<Entry, sqlx::Error> {
    sqlx::query_as::<_, Entry>(
        "INSERT INTO entries (form_id, field_values, source_url, user_agent, ip)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(form_id)
    .bind(sqlx::types::Json(field_values))
    .bind(source_url)
    .bind(user_agent)
    .bind(ip)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Entry>, sqlx::Error> {
    sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct ListParams {
    pub form_id: i64,
    pub limit: i64,
    pub offset: i64,
    pub search: Option<String>,
}

pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<Entry>, sqlx::Error> {
    if let Some(search) = &params.search {
        let pattern = format!("%{search}%");
        sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries
             WHERE form_id = $1 AND field_values::text ILIKE $4
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(params.form_id)
        .bind(params.limit)
        .bind(params.offset)
        .bind(pattern)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries
             WHERE form_id = $1
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(params.form_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(pool)
        .await
    }
}

pub async fn count(
    pool: &PgPool,
    form_id: i64,
    search: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = if let Some(search) = search {
        let pattern = format!("%{search}%");
        sqlx::query_as(
            "SELECT COUNT(*) FROM entries WHERE form_id = $1 AND field_values::text ILIKE $2",
        )
        .bind(form_id)
        .bind(pattern)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query_as("SELECT COUNT(*) FROM entries WHERE form_id = $1")
            .bind(form_id)
            .fetch_one(pool)
            .await?
    };
    Ok(row.0)
}
