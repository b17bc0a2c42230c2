//! Achievement endpoints

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use folio_common::db::{achievements, Achievement, NewAchievement};

use super::SuccessResponse;
use crate::error::{parse_body, ApiError, ApiResult, StorageResultExt};
use crate::AppState;

const INVALID_DATA: &str = "Invalid achievement data";

/// GET /api/achievements
pub async fn list_achievements(State(state): State<AppState>) -> ApiResult<Json<Vec<Achievement>>> {
    let achievements = achievements::list_achievements(&state.db)
        .await
        .or_storage_error("Failed to fetch achievements")?;
    Ok(Json(achievements))
}

/// POST /api/achievements
pub async fn create_achievement(
    State(state): State<AppState>,
    payload: Result<Json<NewAchievement>, JsonRejection>,
) -> ApiResult<Json<Achievement>> {
    let data = parse_body(payload, INVALID_DATA)?;
    let achievement = achievements::create_achievement(&state.db, &data)
        .await
        .or_storage_error("Failed to create achievement")?;
    Ok(Json(achievement))
}

/// PUT /api/achievements/:id
pub async fn update_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewAchievement>, JsonRejection>,
) -> ApiResult<Json<Achievement>> {
    let data = parse_body(payload, INVALID_DATA)?;
    achievements::update_achievement(&state.db, &id, &data)
        .await
        .or_storage_error("Failed to update achievement")?
        .map(Json)
        .ok_or(ApiError::NotFound("Achievement not found"))
}

/// DELETE /api/achievements/:id
pub async fn delete_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    achievements::delete_achievement(&state.db, &id)
        .await
        .or_storage_error("Failed to delete achievement")?;
    Ok(Json(SuccessResponse::ok()))
}

pub fn achievement_routes() -> Router<AppState> {
    Router::new()
        .route("/api/achievements", get(list_achievements).post(create_achievement))
        .route(
            "/api/achievements/:id",
            put(update_achievement).delete(delete_achievement),
        )
}
