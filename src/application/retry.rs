//! Linear-backoff retry policy shared by every store operation.
//!
//! After the attempt with zero-based index `k` fails, the task sleeps
//! `k * backoff` before moving on, so the first retry is immediate. The delay
//! also follows the last failed attempt before the failure is returned:
//! with 3 attempts and a 25ms unit the sleeps are 0ms, 25ms and 50ms.

use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

use crate::application::services::ServiceError;
use crate::domain::repositories::StoreError;

/// Default number of attempts per store operation.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff unit in milliseconds.
pub const DEFAULT_BACKOFF_MS: u64 = 25;

/// Attempt budget and linear delay applied uniformly to store calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is clamped to at least one attempt.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Creates a policy with the backoff unit given in milliseconds.
    pub fn from_millis(max_attempts: u32, backoff_ms: u64) -> Self {
        Self::new(max_attempts, Duration::from_millis(backoff_ms))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Delay slept after the failed attempt with zero-based index `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }

    /// Runs `call` until it succeeds or the attempt budget is spent.
    ///
    /// Each failure is logged and counted under `operation`; the error value
    /// itself never leaves this function.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StoreUnavailable`] once every attempt has failed.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T, ServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        for attempt in 0..self.max_attempts {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Store call failed, retrying"
                    );
                    metrics::counter!("store_attempt_failures_total", "operation" => operation)
                        .increment(1);
                }
            }

            tokio::time::sleep(self.delay_after(attempt)).await;
        }

        error!(
            operation,
            attempts = self.max_attempts,
            "Store call failed after all retries"
        );
        metrics::counter!("store_retry_exhausted_total", "operation" => operation).increment(1);

        Err(ServiceError::StoreUnavailable {
            operation,
            attempts: self.max_attempts,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_millis(DEFAULT_MAX_RETRIES, DEFAULT_BACKOFF_MS)
    }
}
