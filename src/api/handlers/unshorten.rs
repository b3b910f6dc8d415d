//! Handler for short code resolution.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code and redirects to the original URL.
///
/// # Endpoint
///
/// `GET /unshorten/{shorturl}`
///
/// The code is the final segment of `shorturl`.
///
/// # Response Codes
///
/// - **301 Moved Permanently**: `Location` carries the long URL
/// - **404 Not Found**: no mapping for the code
/// - **500 Internal Server Error**: lookup retries exhausted
pub async fn unshorten_handler(
    State(state): State<AppState>,
    Path(shorturl): Path<String>,
) -> Result<Response, AppError> {
    let code = shorturl.rsplit('/').next().unwrap_or_default();

    let mapping = state
        .shortener
        .resolve(code)
        .await?
        .ok_or_else(|| {
            debug!(code, "Short code not found");
            AppError::not_found("Short code not found")
        })?;

    let location = HeaderValue::from_str(&mapping.long_url).map_err(|e| {
        error!(code, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL is not a valid header value")
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
