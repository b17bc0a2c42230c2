//! Project endpoints

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use folio_common::db::{featured_first, projects, NewProject, Project};
use serde::Deserialize;

use super::SuccessResponse;
use crate::error::{parse_body, parse_query, ApiError, ApiResult, StorageResultExt};
use crate::AppState;

const INVALID_DATA: &str = "Invalid project data";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    /// Apply the public-page ordering: featured first, then `order`
    #[serde(default)]
    pub featured_first: bool,
}

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    query: Result<Query<ListProjectsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Project>>> {
    let query = parse_query(query, "Invalid query parameters")?;

    let mut projects = projects::list_projects(&state.db)
        .await
        .or_storage_error("Failed to fetch projects")?;
    if query.featured_first {
        featured_first(&mut projects);
    }
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> ApiResult<Json<Project>> {
    let data = parse_body(payload, INVALID_DATA)?;
    let project = projects::create_project(&state.db, &data)
        .await
        .or_storage_error("Failed to create project")?;
    tracing::info!(id = %project.id, title = %project.title, "Created project");
    Ok(Json(project))
}

/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> ApiResult<Json<Project>> {
    let data = parse_body(payload, INVALID_DATA)?;
    projects::update_project(&state.db, &id, &data)
        .await
        .or_storage_error("Failed to update project")?
        .map(Json)
        .ok_or(ApiError::NotFound("Project not found"))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let removed = projects::delete_project(&state.db, &id)
        .await
        .or_storage_error("Failed to delete project")?;
    tracing::info!(%id, removed, "Deleted project");
    Ok(Json(SuccessResponse::ok()))
}

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", put(update_project).delete(delete_project))
}
