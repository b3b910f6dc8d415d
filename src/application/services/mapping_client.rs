//! Retrying client for the mapping store.

use std::sync::Arc;
use tracing::debug;

use crate::application::retry::RetryPolicy;
use crate::application::services::ServiceError;
use crate::domain::entities::{PutOutcome, UrlMapping};
use crate::domain::repositories::MappingRepository;

/// Mapping reads and writes under the shared retry policy.
///
/// `AlreadyExists` and a missing mapping are outcomes, not failures, and are
/// returned on the first attempt that produces them.
#[derive(Clone)]
pub struct MappingClient {
    repository: Arc<dyn MappingRepository>,
    retry: RetryPolicy,
}

impl MappingClient {
    pub fn new(repository: Arc<dyn MappingRepository>, retry: RetryPolicy) -> Self {
        Self { repository, retry }
    }

    /// Writes a mapping unless its code is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StoreUnavailable`] when every attempt failed.
    pub async fn put(&self, mapping: &UrlMapping) -> Result<PutOutcome, ServiceError> {
        let outcome = self
            .retry
            .run("mapping.put", || self.repository.put(mapping))
            .await?;

        debug!(code = %mapping.short_code, ?outcome, "Mapping put");
        Ok(outcome)
    }

    /// Looks up a mapping by code.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StoreUnavailable`] when every attempt failed.
    pub async fn get(&self, short_code: &str) -> Result<Option<UrlMapping>, ServiceError> {
        let mapping = self
            .retry
            .run("mapping.get", || self.repository.get(short_code))
            .await?;

        debug!(code = %short_code, found = mapping.is_some(), "Mapping lookup");
        Ok(mapping)
    }

    /// Single unretried ping, used by health checks.
    pub async fn is_healthy(&self) -> bool {
        self.repository.ping().await.is_ok()
    }
}
