//! Repository trait for short code mappings.

use crate::domain::entities::{PutOutcome, UrlMapping};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Store interface for short code to long URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL table
/// - [`crate::infrastructure::kv::RedisStore`] - Redis string keys
/// - [`crate::infrastructure::kv::MemoryStore`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a mapping unless its short code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(PutOutcome::Created)` if the mapping was written
    /// - `Ok(PutOutcome::AlreadyExists)` if the code exists; the stored URL is not touched
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend faults.
    async fn put(&self, mapping: &UrlMapping) -> Result<PutOutcome, StoreError>;

    /// Finds a mapping by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend faults.
    async fn get(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Checks that the mapping store answers.
    async fn ping(&self) -> Result<(), StoreError>;
}
