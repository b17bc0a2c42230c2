//! Login, logout and admin credential change
//!
//! There is no session: login only answers whether the pair matched.
//! Passwords are checked against the salted hash in the users table.

use axum::{extract::rejection::JsonRejection, extract::State, routing::{post, put}, Json, Router};
use folio_common::db::users;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::SuccessResponse;
use crate::error::{parse_body, ApiError, ApiResult, StorageResultExt};
use crate::AppState;

const INVALID_REQUEST: &str = "Invalid request data";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user; never includes the hash
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

impl From<users::User> for UserSummary {
    fn from(user: users::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
    pub new_username: String,
    pub new_password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let request = parse_body(payload, INVALID_REQUEST)?;

    let user = users::authenticate(&state.db, &request.username, &request.password)
        .await
        .or_storage_error("Login failed")?
        .ok_or_else(|| {
            warn!(username = %request.username, "Rejected login");
            ApiError::Unauthorized(INVALID_CREDENTIALS)
        })?;

    info!(username = %user.username, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        user: user.into(),
    }))
}

/// POST /api/auth/logout
pub async fn logout() -> Json<SuccessResponse> {
    Json(SuccessResponse::ok())
}

/// PUT /api/admin/credentials
///
/// Requires the current username and password; replaces both.
pub async fn update_credentials(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let request = parse_body(payload, INVALID_REQUEST)?;

    let new_username = request.new_username.trim();
    if new_username.is_empty() || request.new_password.is_empty() {
        return Err(ApiError::BadRequest(INVALID_REQUEST));
    }

    let user = users::authenticate(&state.db, &request.username, &request.password)
        .await
        .or_storage_error("Failed to update credentials")?
        .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

    // users.username UNIQUE is the only taken-name check
    let result =
        users::update_user_credentials(&state.db, &user.id, new_username, &request.new_password)
            .await;
    let updated = match result {
        Err(folio_common::Error::Conflict(_)) => {
            return Err(ApiError::BadRequest("Username already taken"))
        }
        result => result.or_storage_error("Failed to update credentials")?,
    }
    .ok_or(ApiError::NotFound("User not found"))?;

    info!(old = %user.username, new = %updated.username, "Admin credentials updated");

    Ok(Json(LoginResponse {
        success: true,
        user: updated.into(),
    }))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/admin/credentials", put(update_credentials))
}
