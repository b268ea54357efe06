use sqlx::PgPool;

use crate::models::feed::EVENT_FORM_SUBMISSION;
use crate::models::Feed;

pub async fn create(
    pool: &PgPool,
    form_id: i64,
    name: &str,
    url: &str,
    event: Option<&str>,
    active: bool,
) -> Result<Feed, sqlx::Error> {
    sqlx::query_as::<_, Feed>(
        "INSERT INTO feeds (form_id, name, url, event, active)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(form_id)
    .bind(name)
    .bind(url)
    .bind(event)
    .bind(active)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Feed>, sqlx::Error> {
    sqlx::query_as::<_, Feed>("SELECT * FROM feeds WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_form(pool: &PgPool, form_id: i64) -> Result<Vec<Feed>, sqlx::Error> {
    sqlx::query_as::<_, Feed>("SELECT * FROM feeds WHERE form_id = $1 ORDER BY id")
        .bind(form_id)
        .fetch_all(pool)
        .await
}

pub async fn list_active_by_form(pool: &PgPool, form_id: i64) -> Result<Vec<Feed>, sqlx::Error> {
    sqlx::query_as::<_, Feed>(
        "SELECT * FROM feeds WHERE form_id = $1 AND active ORDER BY id",
    )
    .bind(form_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    name: &str,
    url: &str,
    event: Option<&str>,
    active: bool,
) -> Result<Option<Feed>, sqlx::Error> {
    sqlx::query_as::<_, Feed>(
        "UPDATE feeds SET name = $2, url = $3, event = $4, active = $5, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(url)
    .bind(event)
    .bind(active)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM feeds WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Feeds that will never fire automatically because no event is configured.
pub async fn list_missing_event(pool: &PgPool) -> Result<Vec<Feed>, sqlx::Error> {
    sqlx::query_as::<_, Feed>(
        "SELECT * FROM feeds WHERE event IS NULL OR event = '' ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_inactive(pool: &PgPool) -> Result<Vec<Feed>, sqlx::Error> {
    sqlx::query_as::<_, Feed>("SELECT * FROM feeds WHERE NOT active ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Patch feeds with a missing event so automatic delivery can fire again.
/// Returns the number of repaired rows.
pub async fn repair_missing_event(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE feeds SET event = $1, updated_at = now()
         WHERE event IS NULL OR event = ''",
    )
    .bind(EVENT_FORM_SUBMISSION)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
