//! Key-value store implementations.
//!
//! - [`RedisStore`] - Production Redis backend
//! - [`MemoryStore`] - Process-local backend for tests and development

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
