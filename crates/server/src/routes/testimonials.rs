//! Testimonial route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use harborview_core::TestimonialId;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::RequireAdminKey;
use crate::models::{Testimonial, TestimonialForm, TestimonialStats};
use crate::state::AppState;

/// Query string for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Maximum number of entries. Anything but a positive integer is ignored.
    #[serde(default)]
    pub top: Option<String>,
}

impl ListQuery {
    fn limit(&self) -> Option<usize> {
        self.top
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
    }
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub ok: bool,
}

/// Approved testimonials, best first.
///
/// GET /api/testimonials?top=N
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(state.testimonials().list_public(query.limit()).await?))
}

/// Public rating summary.
///
/// GET /api/testimonials/stats
#[instrument(skip_all)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<TestimonialStats>> {
    Ok(Json(state.testimonials().stats().await?))
}

/// Submit a testimonial. It is published immediately.
///
/// POST /api/testimonials
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    AppJson(form): AppJson<TestimonialForm>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    let new = form.validate()?;
    let testimonial = state.testimonials().create(new).await?;

    tracing::info!(
        testimonial_id = %testimonial.id,
        rating = %testimonial.rating,
        "Testimonial published"
    );
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// Every testimonial, newest first.
///
/// GET /api/testimonials/admin
#[instrument(skip_all)]
pub async fn list_all(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(state.testimonials().list_all().await?))
}

/// Delete a testimonial.
///
/// DELETE /api/testimonials/{id}
#[instrument(skip(state), fields(testimonial_id = %id))]
pub async fn delete(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<TestimonialId>,
) -> Result<Json<DeletedResponse>> {
    if state.testimonials().delete(&id).await? {
        tracing::info!("Testimonial deleted");
        Ok(Json(DeletedResponse { ok: true }))
    } else {
        Err(AppError::NotFound("Testimonial not found".to_string()))
    }
}
