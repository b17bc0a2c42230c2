//! Error types for folio-api
//!
//! Every error body is `{"message": "..."}`. Client-facing messages are
//! fixed strings per endpoint; datastore details are logged, never returned.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body or query failed validation (400)
    #[error("{0}")]
    BadRequest(&'static str),

    /// Credentials did not match (401)
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(&'static str),

    /// Unexpected datastore failure (500)
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: folio_common::Error,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Storage { message, source } => {
                error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Attach the client-facing 500 message to a storage result
pub trait StorageResultExt<T> {
    fn or_storage_error(self, message: &'static str) -> ApiResult<T>;
}

impl<T> StorageResultExt<T> for folio_common::Result<T> {
    fn or_storage_error(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|source| ApiError::Storage { message, source })
    }
}

/// Unwrap a JSON body, turning any rejection into a generic 400
///
/// Malformed JSON, a wrong content type, a missing required field and a
/// wrong field type all produce the same `message`.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>, message: &'static str) -> ApiResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(%rejection, "Rejected request body");
            Err(ApiError::BadRequest(message))
        }
    }
}

/// Query-string counterpart of [`parse_body`]
pub fn parse_query<T>(
    query: Result<axum::extract::Query<T>, QueryRejection>,
    message: &'static str,
) -> ApiResult<T> {
    match query {
        Ok(axum::extract::Query(value)) => Ok(value),
        Err(rejection) => {
            debug!(%rejection, "Rejected query string");
            Err(ApiError::BadRequest(message))
        }
    }
}
