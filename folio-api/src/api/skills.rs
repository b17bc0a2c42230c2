//! Skill endpoints

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use folio_common::db::{skills, NewSkill, Skill};

use super::SuccessResponse;
use crate::error::{parse_body, ApiError, ApiResult, StorageResultExt};
use crate::AppState;

const INVALID_DATA: &str = "Invalid skill data";

/// GET /api/skills
pub async fn list_skills(State(state): State<AppState>) -> ApiResult<Json<Vec<Skill>>> {
    let skills = skills::list_skills(&state.db)
        .await
        .or_storage_error("Failed to fetch skills")?;
    Ok(Json(skills))
}

/// POST /api/skills
pub async fn create_skill(
    State(state): State<AppState>,
    payload: Result<Json<NewSkill>, JsonRejection>,
) -> ApiResult<Json<Skill>> {
    let data = parse_body(payload, INVALID_DATA)?;
    let skill = skills::create_skill(&state.db, &data)
        .await
        .or_storage_error("Failed to create skill")?;
    Ok(Json(skill))
}

/// PUT /api/skills/:id
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewSkill>, JsonRejection>,
) -> ApiResult<Json<Skill>> {
    let data = parse_body(payload, INVALID_DATA)?;
    skills::update_skill(&state.db, &id, &data)
        .await
        .or_storage_error("Failed to update skill")?
        .map(Json)
        .ok_or(ApiError::NotFound("Skill not found"))
}

/// DELETE /api/skills/:id
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    skills::delete_skill(&state.db, &id)
        .await
        .or_storage_error("Failed to delete skill")?;
    Ok(Json(SuccessResponse::ok()))
}

pub fn skill_routes() -> Router<AppState> {
    Router::new()
        .route("/api/skills", get(list_skills).post(create_skill))
        .route("/api/skills/:id", put(update_skill).delete(delete_skill))
}
