//! Errors crossing the application layer boundary.

/// Failure of a shorten or unshorten operation.
///
/// Carries no backend detail: individual store faults are logged and retried
/// inside the clients, and only exhaustion is reported here.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{operation} failed after {attempts} attempts")]
    StoreUnavailable {
        operation: &'static str,
        attempts: u32,
    },

    #[error("short code collided on {attempts} consecutive attempts")]
    CollisionExhausted { attempts: u32 },
}
