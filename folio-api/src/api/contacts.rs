//! Contact form and contact inbox endpoints
//!
//! A submitted message is stored first, then relayed through EmailJS. The
//! relay is best-effort: once the row exists the submission has succeeded.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use folio_common::db::{contacts, Contact, ContactUpdate, NewContact};
use tracing::{info, warn};

use super::SuccessResponse;
use crate::error::{parse_body, ApiError, ApiResult, StorageResultExt};
use crate::AppState;

const INVALID_DATA: &str = "Invalid contact data";

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<NewContact>, JsonRejection>,
) -> ApiResult<Json<Contact>> {
    let data = parse_body(payload, INVALID_DATA)?;
    let contact = contacts::create_contact(&state.db, &data)
        .await
        .or_storage_error("Failed to save contact")?;
    info!(id = %contact.id, "Stored contact message");

    if let Some(relay) = &state.relay {
        match relay.relay(&contact).await {
            Ok(()) => info!(id = %contact.id, "Contact message relayed"),
            Err(e) => warn!(id = %contact.id, error = %e, "Contact relay failed; message kept"),
        }
    }

    Ok(Json(contact))
}

/// GET /api/contacts
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = contacts::list_contacts(&state.db)
        .await
        .or_storage_error("Failed to fetch contacts")?;
    Ok(Json(contacts))
}

/// PUT /api/contacts/:id
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactUpdate>, JsonRejection>,
) -> ApiResult<Json<Contact>> {
    let update = parse_body(payload, INVALID_DATA)?;
    contacts::set_replied(&state.db, &id, update.replied)
        .await
        .or_storage_error("Failed to update contact")?
        .map(Json)
        .ok_or(ApiError::NotFound("Contact not found"))
}

/// DELETE /api/contacts/:id
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    contacts::delete_contact(&state.db, &id)
        .await
        .or_storage_error("Failed to delete contact")?;
    Ok(Json(SuccessResponse::ok()))
}

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts/:id", put(update_contact).delete(delete_contact))
}
