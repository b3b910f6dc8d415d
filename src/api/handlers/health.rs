//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with store checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Both stores answered a ping
/// - **503 Service Unavailable**: At least one store is unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "counter_store": { "status": "ok", "message": "Counter store reachable" },
///     "mapping_store": { "status": "ok", "message": "Mapping store reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (counter_ok, mapping_ok) = tokio::join!(
        state.shortener.counter_store_healthy(),
        state.shortener.mapping_store_healthy()
    );

    let checks = HealthChecks {
        counter_store: CheckStatus::from_ping(counter_ok, "Counter store"),
        mapping_store: CheckStatus::from_ping(mapping_ok, "Mapping store"),
    };

    let all_healthy = checks.counter_store.is_ok() && checks.mapping_store.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
