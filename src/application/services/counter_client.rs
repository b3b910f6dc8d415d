//! Retrying client for the singleton counter.

use std::sync::Arc;
use tracing::debug;

use crate::application::retry::RetryPolicy;
use crate::application::services::ServiceError;
use crate::domain::repositories::CounterRepository;

/// Atomic counter access under the shared retry policy.
#[derive(Clone)]
pub struct CounterClient {
    repository: Arc<dyn CounterRepository>,
    retry: RetryPolicy,
}

impl CounterClient {
    pub fn new(repository: Arc<dyn CounterRepository>, retry: RetryPolicy) -> Self {
        Self { repository, retry }
    }

    /// Increments the counter and returns its new value.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StoreUnavailable`] when every attempt failed.
    /// A failed attempt never exposes a partial increment to the caller.
    pub async fn increment(&self) -> Result<u64, ServiceError> {
        let record = self
            .retry
            .run("counter.increment", || self.repository.increment())
            .await?;

        debug!(counter = %record.id, value = record.value, "Counter incremented");
        Ok(record.value)
    }

    /// Single unretried ping, used by health checks.
    pub async fn is_healthy(&self) -> bool {
        self.repository.ping().await.is_ok()
    }
}
