//! HTTP API handlers for folio-api

pub mod achievements;
pub mod auth;
pub mod contacts;
pub mod health;
pub mod profile;
pub mod projects;
pub mod settings;
pub mod skills;

pub use achievements::achievement_routes;
pub use auth::auth_routes;
pub use contacts::contact_routes;
pub use health::health_routes;
pub use profile::profile_routes;
pub use projects::project_routes;
pub use settings::settings_routes;
pub use skills::skill_routes;

use serde::Serialize;

use crate::error::ApiError;

/// Any `/api/*` path no route claims
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found")
}

/// `{"success": true}`, returned by deletes and logout
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
