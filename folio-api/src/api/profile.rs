//! Profile endpoints

use axum::{extract::rejection::JsonRejection, extract::State, routing::get, Json, Router};
use folio_common::db::{profile, NewProfile, Profile};

use crate::error::{parse_body, ApiResult, StorageResultExt};
use crate::AppState;

/// GET /api/profile
///
/// Returns `null` until the profile has been saved once.
pub async fn get_profile(State(state): State<AppState>) -> ApiResult<Json<Option<Profile>>> {
    let profile = profile::get_profile(&state.db)
        .await
        .or_storage_error("Failed to fetch profile")?;
    Ok(Json(profile))
}

/// PUT /api/profile
pub async fn put_profile(
    State(state): State<AppState>,
    payload: Result<Json<NewProfile>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let data = parse_body(payload, "Invalid profile data")?;
    let profile = profile::upsert_profile(&state.db, &data)
        .await
        .or_storage_error("Failed to update profile")?;
    Ok(Json(profile))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/api/profile", get(get_profile).put(put_profile))
}
