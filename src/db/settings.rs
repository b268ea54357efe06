use sqlx::PgPool;

use crate::mapper::settings::MapperSettings;

const MAPPER_SETTINGS_NAME: &str = "webhook_mapper";

/// Load the mapper filter configuration. A missing row or a blob that no
/// longer deserializes yields the defaults (mode `all`, nothing filtered).
pub async fn get_mapper(pool: &PgPool) -> Result<MapperSettings, sqlx::Error> {
    let row: Option<(serde_json::Value,)> =
        sqlx::query_as("SELECT value FROM settings WHERE name = $1")
            .bind(MAPPER_SETTINGS_NAME)
            .fetch_optional(pool)
            .await?;

    Ok(row
        .and_then(|(value,)| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

pub async fn put_mapper(pool: &PgPool, settings: &MapperSettings) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO settings (name, value) VALUES ($1, $2)
         ON CONFLICT (name) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
    )
    .bind(MAPPER_SETTINGS_NAME)
    .bind(sqlx::types::Json(settings))
    .execute(pool)
    .await?;
    Ok(())
}
