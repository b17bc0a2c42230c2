//! folio-api library - portfolio REST service
//!
//! Public site sections read entity lists from `/api/*`; the admin
//! dashboard writes through the same endpoints.

pub mod api;
pub mod email;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

use axum::{routing::any, Router};
use chrono::{DateTime, Utc};
use email::EmailRelay;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Contact email relay; `None` when EmailJS is not configured
    pub relay: Option<Arc<EmailRelay>>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            relay: None,
            startup_time: Utc::now(),
        }
    }

    pub fn with_relay(mut self, relay: EmailRelay) -> Self {
        self.relay = Some(Arc::new(relay));
        self
    }
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::auth_routes())
        .merge(api::profile_routes())
        .merge(api::project_routes())
        .merge(api::skill_routes())
        .merge(api::achievement_routes())
        .merge(api::contact_routes())
        .merge(api::settings_routes())
        .merge(api::health_routes())
        .route("/api/*rest", any(api::api_not_found))
        .with_state(state)
}

/// Router plus request tracing, CORS and (optionally) the static front end
///
/// Unknown paths outside `/api` fall back to `static_dir/index.html` so
/// client-side routes resolve.
pub fn build_app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = build_router(state);

    if let Some(dir) = static_dir {
        let site = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(site);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
