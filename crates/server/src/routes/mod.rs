//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/health                  - Liveness check
//! GET    /api/health/ready            - Readiness check (data file readable)
//!
//! # Contact
//! POST   /api/contact                 - Submit the contact form
//! GET    /api/contact/stats           - Inbox counters
//! GET    /api/contact                 - All messages (admin)
//! GET    /api/contact/{id}            - One message (admin)
//! PATCH  /api/contact/{id}/read       - Mark read (admin)
//! PATCH  /api/contact/{id}            - Update status / notes (admin)
//! DELETE /api/contact/{id}            - Delete (admin)
//!
//! # Testimonials
//! GET    /api/testimonials?top=N      - Approved testimonials, best first
//! GET    /api/testimonials/stats      - Rating summary
//! POST   /api/testimonials            - Submit a testimonial
//! GET    /api/testimonials/admin      - All testimonials (admin)
//! DELETE /api/testimonials/{id}       - Delete (admin)
//!
//! # Static
//! GET    /public/*                    - Files from `STATIC_DIR`
//! ```

pub mod contact;
pub mod testimonials;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware::from_fn,
    routing::{delete, get, patch},
};
use serde_json::{Value, json};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{cors_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Maximum accepted JSON body size.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::submit))
        .route("/stats", get(contact::stats))
        .route(
            "/{id}",
            get(contact::show)
                .patch(contact::update)
                .delete(contact::delete),
        )
        .route("/{id}/read", patch(contact::mark_read))
}

/// Create the testimonial routes router.
pub fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::list).post(testimonials::submit))
        .route("/stats", get(testimonials::stats))
        .route("/admin", get(testimonials::list_all))
        .route("/{id}", delete(testimonials::delete))
}

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/contact", contact_routes())
        .nest("/testimonials", testimonial_routes())
        .fallback(api_not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Build the complete application: API, static files, and middleware.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);
    let cors = cors_layer(&state.config().cors_origin);

    Router::new()
        .nest("/api", api_routes())
        .nest_service("/public", static_dir)
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns `{ "ok": true }` if the server is running. Does not check the store.
async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the data file cannot be read.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().read(|_| ()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn api_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
