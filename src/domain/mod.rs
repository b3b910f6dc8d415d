//! Domain layer containing entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait definitions and the store error type
//!
//! The domain layer has no dependencies on the HTTP layer. Retry behaviour and
//! orchestration live in [`crate::application`].

pub mod entities;
pub mod repositories;
