//! Contact form route handlers.
//!
//! Guests submit the contact form publicly; everything else here is the staff
//! inbox and sits behind [`RequireAdminKey`].

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use harborview_core::MessageId;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::RequireAdminKey;
use crate::models::{ContactForm, Message, MessagePatchForm, MessageStats};
use crate::state::AppState;

/// Response for a stored contact submission.
#[derive(Debug, Serialize)]
pub struct SubmittedResponse {
    pub ok: bool,
    pub id: MessageId,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub ok: bool,
}

fn not_found() -> AppError {
    AppError::NotFound("Message not found".to_string())
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    AppJson(form): AppJson<ContactForm>,
) -> Result<(StatusCode, Json<SubmittedResponse>)> {
    let new = form.validate()?;
    let message = state.messages().create(new).await?;

    tracing::info!(message_id = %message.id, "Contact message received");
    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse {
            ok: true,
            id: message.id,
        }),
    ))
}

/// Inbox counters.
///
/// GET /api/contact/stats
#[instrument(skip_all)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<MessageStats>> {
    Ok(Json(state.messages().stats().await?))
}

/// All messages, newest first.
///
/// GET /api/contact
#[instrument(skip_all)]
pub async fn list(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>> {
    Ok(Json(state.messages().list().await?))
}

/// A single message.
///
/// GET /api/contact/{id}
#[instrument(skip(state), fields(message_id = %id))]
pub async fn show(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<MessageId>,
) -> Result<Json<Message>> {
    state
        .messages()
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Mark a message as read.
///
/// PATCH /api/contact/{id}/read
#[instrument(skip(state), fields(message_id = %id))]
pub async fn mark_read(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<MessageId>,
) -> Result<Json<Message>> {
    state
        .messages()
        .mark_read(&id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Update status, notes, or read flag.
///
/// PATCH /api/contact/{id}
#[instrument(skip(state, form), fields(message_id = %id))]
pub async fn update(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<MessageId>,
    AppJson(form): AppJson<MessagePatchForm>,
) -> Result<Json<Message>> {
    let patch = form.validate()?;
    let message = state
        .messages()
        .update(&id, patch)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(status = %message.status, "Message updated");
    Ok(Json(message))
}

/// Delete a message.
///
/// DELETE /api/contact/{id}
#[instrument(skip(state), fields(message_id = %id))]
pub async fn delete(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<MessageId>,
) -> Result<Json<DeletedResponse>> {
    if state.messages().delete(&id).await? {
        tracing::info!("Message deleted");
        Ok(Json(DeletedResponse { ok: true }))
    } else {
        Err(not_found())
    }
}
