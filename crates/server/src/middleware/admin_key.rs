//! Shared-key guard for staff routes.
//!
//! Staff endpoints (message inbox, testimonial moderation) require the
//! `x-admin-key` header to match `ADMIN_KEY`. When no key is configured the
//! guard lets every request through; the server warns about this at startup.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::state::AppState;

/// The HTTP header carrying the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Extractor that requires a valid admin key.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_messages(
///     _admin: RequireAdminKey,
///     State(state): State<AppState>,
/// ) -> Result<Json<Vec<Message>>> {
///     Ok(Json(state.messages().list().await?))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdminKey;

impl FromRequestParts<AppState> for RequireAdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config().admin_key.as_ref() else {
            return Ok(Self);
        };

        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();

        if constant_time_compare(expected.expose_secret(), provided) {
            Ok(Self)
        } else {
            tracing::warn!(
                path = %parts.uri.path(),
                "Rejected request with missing or invalid admin key"
            );
            Err(AppError::Unauthorized)
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "helloo"));
    }
}
