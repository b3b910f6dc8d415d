//! DTOs for health check endpoint.

use serde::{Deserialize, Serialize};

/// Health check response with component status.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each store.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub counter_store: CheckStatus,
    pub mapping_store: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn from_ping(healthy: bool, name: &str) -> Self {
        if healthy {
            Self {
                status: "ok".to_string(),
                message: Some(format!("{} reachable", name)),
            }
        } else {
            Self {
                status: "error".to_string(),
                message: Some(format!("{} did not answer ping", name)),
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
