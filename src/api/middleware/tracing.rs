//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::utils::client_ip::FORWARDED_FOR;

/// Trace layer with the request span built by [`request_span`].
pub type HttpTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span>;

/// Creates the request tracing layer.
///
/// Every request gets an `INFO` span carrying the method, the path and the
/// caller from `X-Forwarded-For`. Retry and collision warnings logged while
/// handling the request are nested under it. The response is logged with
/// its status and latency in milliseconds:
///
/// ```text
/// INFO request{method=POST uri=/shorten client=203.0.113.7}: finished processing request latency=3 ms status=200
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(request_span as fn(&Request<Body>) -> Span)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Builds the span for one request. `client` is `-` when the header is absent.
fn request_span(request: &Request<Body>) -> Span {
    let client = request
        .headers()
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri().path(),
        client
    )
}
