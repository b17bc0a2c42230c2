//! Skill operations

use super::models::{NewSkill, Skill};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// All skills grouped by category, then by `order` within each category
pub async fn list_skills(pool: &SqlitePool) -> Result<Vec<Skill>> {
    let skills = sqlx::query_as::<_, Skill>("SELECT * FROM skills ORDER BY category, sort_order")
        .fetch_all(pool)
        .await?;
    Ok(skills)
}

pub async fn create_skill(pool: &SqlitePool, data: &NewSkill) -> Result<Skill> {
    let skill = sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (id, name, category, icon_url, level, sort_order, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.icon_url)
    .bind(data.level.unwrap_or(1))
    .bind(data.order.unwrap_or(0))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(skill)
}

/// Returns `None` if the id does not exist
pub async fn update_skill(pool: &SqlitePool, id: &str, data: &NewSkill) -> Result<Option<Skill>> {
    let skill = sqlx::query_as::<_, Skill>(
        r#"
        UPDATE skills SET name = ?, category = ?, icon_url = ?, level = ?, sort_order = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.icon_url)
    .bind(data.level.unwrap_or(1))
    .bind(data.order.unwrap_or(0))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(skill)
}

pub async fn delete_skill(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM skills WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
