//! Admin settings endpoints
//!
//! **Request:** `PUT {"key": "...", "value": "..."}`
//! **Response:** the stored row
//!
//! Writes are upserts on `key`.

use axum::{extract::rejection::JsonRejection, extract::State, routing::get, Json, Router};
use folio_common::db::{settings, AdminSetting, NewAdminSetting};

use crate::error::{parse_body, ApiError, ApiResult, StorageResultExt};
use crate::AppState;

const INVALID_DATA: &str = "Invalid settings data";

/// GET /api/admin/settings
pub async fn list_settings(State(state): State<AppState>) -> ApiResult<Json<Vec<AdminSetting>>> {
    let settings = settings::list_settings(&state.db)
        .await
        .or_storage_error("Failed to fetch admin settings")?;
    Ok(Json(settings))
}

/// PUT /api/admin/settings
pub async fn put_setting(
    State(state): State<AppState>,
    payload: Result<Json<NewAdminSetting>, JsonRejection>,
) -> ApiResult<Json<AdminSetting>> {
    let data = parse_body(payload, INVALID_DATA)?;
    if data.key.trim().is_empty() {
        return Err(ApiError::BadRequest(INVALID_DATA));
    }

    let setting = settings::upsert_setting(&state.db, &data.key, &data.value)
        .await
        .or_storage_error("Failed to update admin setting")?;
    tracing::info!(key = %setting.key, "Admin setting updated");
    Ok(Json(setting))
}

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/api/admin/settings", get(list_settings).put(put_setting))
}
