//! Project operations
//!
//! Lists are ordered by `order` ascending; ties fall back to creation time
//! so the public page is stable between reloads.

use super::models::{NewProject, Project};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<Project>> {
    let projects =
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY sort_order, created_at")
            .fetch_all(pool)
            .await?;
    Ok(projects)
}

pub async fn get_project(pool: &SqlitePool, id: &str) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(project)
}

fn technologies_json(data: &NewProject) -> Result<Option<String>> {
    data.technologies
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(crate::Error::from)
}

pub async fn create_project(pool: &SqlitePool, data: &NewProject) -> Result<Project> {
    let now = Utc::now();

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (
            id, title, description, technologies, code_url, demo_url,
            featured, image_url, sort_order, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(&data.title)
    .bind(&data.description)
    .bind(technologies_json(data)?)
    .bind(&data.code_url)
    .bind(&data.demo_url)
    .bind(data.featured.unwrap_or(false))
    .bind(&data.image_url)
    .bind(data.order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(project)
}

/// Replace a project's fields and refresh `updated_at`
///
/// Returns `None` if the id does not exist.
pub async fn update_project(pool: &SqlitePool, id: &str, data: &NewProject) -> Result<Option<Project>> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects SET
            title = ?, description = ?, technologies = ?, code_url = ?,
            demo_url = ?, featured = ?, image_url = ?, sort_order = ?,
            updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(technologies_json(data)?)
    .bind(&data.code_url)
    .bind(&data.demo_url)
    .bind(data.featured.unwrap_or(false))
    .bind(&data.image_url)
    .bind(data.order.unwrap_or(0))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// Returns true if a row was removed
pub async fn delete_project(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
