//! Admin user accounts
//!
//! Only the salted hash is stored; see [`crate::credentials`].

use crate::config::AdminCredentials;
use crate::credentials::{generate_salt, hash_password, verify_password};
use crate::{Error, Result};
use sqlx::{FromRow, SqlitePool};
use tracing::{info, warn};

/// User row. Not `Serialize`; hashes stay server-side.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
}

pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, password_salt)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(super::new_id())
    .bind(username)
    .bind(&hash)
    .bind(&salt)
    .fetch_one(pool)
    .await
    .map_err(|e| username_conflict(e, username))?;

    Ok(user)
}

/// Replace username and password; a new salt is drawn every time
///
/// Returns `None` if no user has the given id, and [`Error::Conflict`] if
/// another user already has `username`.
pub async fn update_user_credentials(
    pool: &SqlitePool,
    id: &str,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = ?, password_hash = ?, password_salt = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(&hash)
    .bind(&salt)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| username_conflict(e, username))?;

    Ok(user)
}

/// A write that hit `users.username UNIQUE` becomes [`Error::Conflict`]
fn username_conflict(e: sqlx::Error, username: &str) -> Error {
    let unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        Error::Conflict(format!("Username already taken: {}", username))
    } else {
        Error::Database(e)
    }
}

/// Look up a user and check the password
///
/// Returns `None` both for an unknown username and for a wrong password, so
/// callers cannot tell the two apart.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<Option<User>> {
    let user = get_user_by_username(pool, username).await?;
    Ok(user.filter(|u| verify_password(password, &u.password_salt, &u.password_hash)))
}

/// Create the configured admin account if the users table is empty
///
/// Returns true if an account was created.
pub async fn seed_admin(pool: &SqlitePool, admin: &AdminCredentials) -> Result<bool> {
    if count_users(pool).await? > 0 {
        return Ok(false);
    }

    match admin.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => {
            let user = create_user(pool, admin.username(), password).await?;
            info!(username = %user.username, "Created admin account");
            Ok(true)
        }
        None => {
            warn!("No admin account exists and no admin password is configured; login is disabled");
            Ok(false)
        }
    }
}
