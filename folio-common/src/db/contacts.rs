//! Contact message operations

use super::models::{Contact, NewContact};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn create_contact(pool: &SqlitePool, data: &NewContact) -> Result<Contact> {
    let contact = sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (id, name, email, subject, message, replied, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.subject)
    .bind(&data.message)
    .bind(data.replied.unwrap_or(false))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(contact)
}

/// Oldest first
pub async fn list_contacts(pool: &SqlitePool) -> Result<Vec<Contact>> {
    let contacts = sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    Ok(contacts)
}

pub async fn set_replied(pool: &SqlitePool, id: &str, replied: bool) -> Result<Option<Contact>> {
    let contact = sqlx::query_as::<_, Contact>(
        "UPDATE contacts SET replied = ? WHERE id = ? RETURNING *",
    )
    .bind(replied)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(contact)
}

pub async fn delete_contact(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
