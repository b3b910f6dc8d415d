//! Errors raised by backing store implementations.

/// A single failed call against a backing store.
///
/// Every variant is treated as transient by the retrying clients in
/// [`crate::application::services`]; none of them is ever shown to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("unexpected store response: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error from any displayable message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
