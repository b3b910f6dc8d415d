//! DTOs for the shorten endpoint.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute URL).
    ///
    /// It is later sent back verbatim in a `Location` header, so characters a
    /// header value cannot carry are rejected even where URL parsing skips them.
    #[validate(
        url(message = "Invalid URL format"),
        custom(function = "validate_location")
    )]
    pub url_long: String,

    /// Public prefix the short code is appended to.
    #[validate(length(min = 1, message = "cdn_prefix must not be empty"))]
    pub cdn_prefix: String,
}

/// Rejects URLs that cannot be used verbatim as a `Location` header value.
fn validate_location(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(url).is_err() {
        let mut error = ValidationError::new("location");
        error.message = Some("URL contains characters not allowed in a redirect".into());
        return Err(error);
    }

    Ok(())
}

/// Successful shorten result.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub url_long: String,
    pub url_short: String,
}
