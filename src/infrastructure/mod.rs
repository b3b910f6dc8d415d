//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`kv`] - Redis and in-memory stores
//! - [`stores`] - Backend selection from configuration

pub mod kv;
pub mod persistence;
pub mod stores;

pub use stores::Stores;
