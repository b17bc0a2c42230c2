//! Achievement operations

use super::models::{Achievement, NewAchievement};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// Ordered by `achieved_at` ascending; undated achievements sort last
pub async fn list_achievements(pool: &SqlitePool) -> Result<Vec<Achievement>> {
    let achievements = sqlx::query_as::<_, Achievement>(
        "SELECT * FROM achievements ORDER BY achieved_at IS NULL, achieved_at, created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(achievements)
}

pub async fn create_achievement(pool: &SqlitePool, data: &NewAchievement) -> Result<Achievement> {
    let achievement = sqlx::query_as::<_, Achievement>(
        r#"
        INSERT INTO achievements (
            id, title, description, kind, issuer, certificate_url,
            verified, achieved_at, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.kind)
    .bind(&data.issuer)
    .bind(&data.certificate_url)
    .bind(data.verified.unwrap_or(false))
    .bind(data.achieved_at)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(achievement)
}

pub async fn update_achievement(
    pool: &SqlitePool,
    id: &str,
    data: &NewAchievement,
) -> Result<Option<Achievement>> {
    let achievement = sqlx::query_as::<_, Achievement>(
        r#"
        UPDATE achievements SET
            title = ?, description = ?, kind = ?, issuer = ?,
            certificate_url = ?, verified = ?, achieved_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.kind)
    .bind(&data.issuer)
    .bind(&data.certificate_url)
    .bind(data.verified.unwrap_or(false))
    .bind(data.achieved_at)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(achievement)
}

pub async fn delete_achievement(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM achievements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
