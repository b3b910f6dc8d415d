//! Application layer: retry discipline and request orchestration.
//!
//! Services consume the repository traits from [`crate::domain`] and expose a
//! backend-agnostic API to the HTTP handlers.
//!
//! - [`retry`] - Linear-backoff retry policy
//! - [`services`] - Retrying store clients and the shortener service

pub mod retry;
pub mod services;
