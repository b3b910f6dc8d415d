//! Handler for the shorten endpoint.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// The caller's identity is the first hop of `X-Forwarded-For`; it
/// personalises the generated code.
///
/// # Request Body
///
/// ```json
/// {
///   "url_long": "https://example.com/some/long/path",
///   "cdn_prefix": "https://s.example.com"
/// }
/// ```
///
/// The body is parsed as JSON regardless of `Content-Type`.
///
/// # Response
///
/// ```json
/// {
///   "url_long": "https://example.com/some/long/path",
///   "url_short": "https://s.example.com/7a895df74ca2b36e"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: malformed body, invalid URL, empty prefix, or
///   missing `X-Forwarded-For`; the counter is not touched
/// - **500 Internal Server Error**: store retries or collision cycles
///   exhausted (empty body)
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    let payload: ShortenRequest = serde_json::from_slice(&body).map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.to_string() }))
    })?;
    payload.validate()?;

    let client_ip = extract_client_ip(&headers)?;

    let shortened = state
        .shortener
        .shorten(&payload.url_long, &payload.cdn_prefix, &client_ip)
        .await?;

    Ok(Json(ShortenResponse {
        url_long: shortened.long_url,
        url_short: shortened.short_url,
    }))
}
