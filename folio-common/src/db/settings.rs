//! Admin settings database operations
//!
//! Generic key/value table; `key` is unique and writes are upserts.

use super::models::AdminSetting;
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn list_settings(pool: &SqlitePool) -> Result<Vec<AdminSetting>> {
    let settings = sqlx::query_as::<_, AdminSetting>("SELECT * FROM admin_settings ORDER BY key")
        .fetch_all(pool)
        .await?;
    Ok(settings)
}

pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<AdminSetting>> {
    let setting = sqlx::query_as::<_, AdminSetting>("SELECT * FROM admin_settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(setting)
}

/// Insert `key` with `value`, or overwrite the value and refresh `updated_at`
pub async fn upsert_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<AdminSetting> {
    let setting = sqlx::query_as::<_, AdminSetting>(
        r#"
        INSERT INTO admin_settings (id, key, value, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(setting)
}
