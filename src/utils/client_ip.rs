//! Caller identity extraction from forwarding headers.

use crate::AppError;
use axum::http::HeaderMap;
use serde_json::json;

/// Header the CDN appends the caller's address to.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Extracts the caller's network identity from `X-Forwarded-For`.
///
/// The first hop is the original client; later hops are proxies. Surrounding
/// whitespace is trimmed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The header is missing
/// - The header value contains invalid UTF-8
/// - The first hop is empty
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 70.41.3.18".parse().unwrap());
///
/// assert_eq!(extract_client_ip(&headers).unwrap(), "203.0.113.7");
/// ```
pub fn extract_client_ip(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(FORWARDED_FOR)
        .ok_or_else(|| {
            AppError::bad_request(
                "Missing X-Forwarded-For header",
                json!({ "header": FORWARDED_FOR }),
            )
        })?
        .to_str()
        .map_err(|_| {
            AppError::bad_request(
                "Invalid X-Forwarded-For header",
                json!({ "header": FORWARDED_FOR }),
            )
        })?;

    let first_hop = value.split(',').next().unwrap_or_default().trim();

    if first_hop.is_empty() {
        return Err(AppError::bad_request(
            "Empty X-Forwarded-For header",
            json!({ "header": FORWARDED_FOR }),
        ));
    }

    Ok(first_hop.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_single_hop() {
        let result = extract_client_ip(&headers_with("203.0.113.7"));
        assert_eq!(result.unwrap(), "203.0.113.7");
    }

    #[test]
    fn test_first_of_many_hops() {
        let result = extract_client_ip(&headers_with("203.0.113.7, 70.41.3.18, 150.172.238.178"));
        assert_eq!(result.unwrap(), "203.0.113.7");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let result = extract_client_ip(&headers_with("  198.51.100.2 ,10.0.0.1"));
        assert_eq!(result.unwrap(), "198.51.100.2");
    }

    #[test]
    fn test_ipv6() {
        let result = extract_client_ip(&headers_with("2001:db8::1"));
        assert_eq!(result.unwrap(), "2001:db8::1");
    }

    #[test]
    fn test_missing_header() {
        let result = extract_client_ip(&HeaderMap::new());
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_empty_first_hop() {
        assert!(extract_client_ip(&headers_with("")).is_err());
        assert!(extract_client_ip(&headers_with(" , 10.0.0.1")).is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE, 0xFD]) {
            headers.insert(FORWARDED_FOR, value);
            assert!(extract_client_ip(&headers).is_err());
        }
    }
}
