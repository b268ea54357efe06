use sqlx::PgPool;

use crate::models::{Field, Form};

pub async fn create(pool: &PgPool, title: &str, fields: &[Field]) -> Result<Form, sqlx::Error> {
    sqlx::query_as::<_, Form>(
        "INSERT INTO forms (title, fields) VALUES ($1, $2) RETURNING *",
    )
    .bind(title)
    .bind(sqlx::types::Json(fields))
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>("SELECT * FROM forms WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>("SELECT * FROM forms ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    title: &str,
    fields: &[Field],
) -> Result<Option<Form>, sqlx::Error> {
    sqlx::query_as::<_, Form>(
        "UPDATE forms SET title = $2, fields = $3, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(sqlx::types::Json(fields))
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM forms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Form ids with no feeds at all; used by the diagnostics report.
pub async fn ids_without_feeds(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT f.id FROM forms f
         LEFT JOIN feeds fe ON fe.form_id = f.id
         WHERE fe.id IS NULL ORDER BY f.id",
    )
    .fetch_all(pool)
    .await
}
