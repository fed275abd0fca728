//! CORS policy for the browser frontend.

use axum::http::{HeaderName, Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::{ADMIN_KEY_HEADER, REQUEST_ID_HEADER};
use crate::config::CorsOrigin;

/// Build the CORS layer for the configured origins.
///
/// Cookies are only allowed with an explicit origin list; browsers reject
/// credentialed requests against a wildcard origin.
#[must_use]
pub fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(ADMIN_KEY_HEADER)])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    match origin {
        CorsOrigin::Any => layer.allow_origin(Any),
        CorsOrigin::List(origins) => layer
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_credentials(true),
    }
}
