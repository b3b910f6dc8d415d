//! Cross-origin access for browser clients.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Creates a permissive CORS layer.
///
/// Every response, including errors, carries `Access-Control-Allow-Origin: *`.
/// Preflight requests for the shorten and unshorten routes are answered
/// directly by the layer.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(3600))
}
