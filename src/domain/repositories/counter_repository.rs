//! Repository trait for the singleton counter record.

use crate::domain::entities::CounterRecord;
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Store interface for the atomic counter.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCounterRepository`] - PostgreSQL upsert
/// - [`crate::infrastructure::kv::RedisStore`] - Redis `INCR`
/// - [`crate::infrastructure::kv::MemoryStore`] - Process-local atomic
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Atomically adds one to the counter and returns the record with its new value.
    ///
    /// Two concurrent calls must never return the same value. A missing record
    /// is created by the first increment, which returns 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on any backend fault. The increment must either be
    /// applied in full or not at all.
    async fn increment(&self) -> Result<CounterRecord, StoreError>;

    /// Checks that the counter store answers.
    async fn ping(&self) -> Result<(), StoreError>;
}
