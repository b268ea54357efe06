use sqlx::PgPool;

use crate::delivery::DeliveryOutcome;
use crate::models::{DeliveryLog, Feed};

/// Fixed page size for the log browser.
pub const PAGE_SIZE: i64 = 50;

pub async fn create(
    pool: &PgPool,
    entry_id: i64,
    feed: &Feed,
    outcome: &DeliveryOutcome,
) -> Result<DeliveryLog, sqlx::Error> {
    sqlx::query_as::<_, DeliveryLog>(
        "INSERT INTO delivery_log
             (entry_id, form_id, feed_id, feed_name, feed_url, status, response_code, response_message)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(entry_id)
    .bind(feed.form_id)
    .bind(feed.id)
    .bind(&feed.name)
    .bind(&feed.url)
    .bind(outcome.status.as_str())
    .bind(outcome.response_code)
    .bind(&outcome.message)
    .fetch_one(pool)
    .await
}

#[derive(Debug, Default)]
pub struct LogFilter {
    pub status: Option<String>,
    pub form_id: Option<i64>,
    pub search: Option<String>,
}

pub async fn list(
    pool: &PgPool,
    filter: &LogFilter,
    offset: i64,
) -> Result<Vec<DeliveryLog>, sqlx::Error> {
    sqlx::query_as::<_, DeliveryLog>(
        "SELECT * FROM delivery_log
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::bigint IS NULL OR form_id = $2)
           AND ($3::text IS NULL
                OR feed_name ILIKE $3 OR feed_url ILIKE $3 OR entry_id::text ILIKE $3)
         ORDER BY created_at DESC, id DESC
         LIMIT $4 OFFSET $5",
    )
    .bind(&filter.status)
    .bind(filter.form_id)
    .bind(filter.search.as_ref().map(|s| format!("%{s}%")))
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, filter: &LogFilter) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM delivery_log
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::bigint IS NULL OR form_id = $2)
           AND ($3::text IS NULL
                OR feed_name ILIKE $3 OR feed_url ILIKE $3 OR entry_id::text ILIKE $3)",
    )
    .bind(&filter.status)
    .bind(filter.form_id)
    .bind(filter.search.as_ref().map(|s| format!("%{s}%")))
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
