//! Profile (single row) operations

use super::models::{NewProfile, Profile};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn get_profile(pool: &SqlitePool) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profile LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

/// Insert the profile if absent, else update it and refresh `updated_at`
///
/// The existing row keeps its id and `created_at`.
pub async fn upsert_profile(pool: &SqlitePool, data: &NewProfile) -> Result<Profile> {
    let now = Utc::now();

    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profile (
            id, singleton, name, email, phone, bio, profile_image_url,
            linkedin_url, github_url, resume_url, created_at, updated_at
        ) VALUES (?, 1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(singleton) DO UPDATE SET
            name = excluded.name,
            email = excluded.email,
            phone = excluded.phone,
            bio = excluded.bio,
            profile_image_url = excluded.profile_image_url,
            linkedin_url = excluded.linkedin_url,
            github_url = excluded.github_url,
            resume_url = excluded.resume_url,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.bio)
    .bind(&data.profile_image_url)
    .bind(&data.linkedin_url)
    .bind(&data.github_url)
    .bind(&data.resume_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}
