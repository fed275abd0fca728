//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (origin from `CORS_ORIGIN`)
//! 5. Security headers (API routes only)
//!
//! Staff routes additionally use the [`RequireAdminKey`] extractor.

pub mod admin_key;
pub mod cors;
pub mod request_id;
pub mod security_headers;

pub use admin_key::{ADMIN_KEY_HEADER, RequireAdminKey};
pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
