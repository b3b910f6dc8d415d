//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`               - Create a short URL
//! - `GET  /unshorten/{shorturl}`  - Redirect to the long URL
//! - `GET  /health`                - Store reachability
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - `Access-Control-Allow-Origin: *` on every response
//!
//! Trailing slash normalisation is applied by the server around this router.

use crate::api::handlers::{health_handler, shorten_handler, unshorten_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/unshorten/{shorturl}", get(unshorten_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}
