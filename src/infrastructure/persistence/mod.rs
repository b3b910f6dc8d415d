//! PostgreSQL repository implementations.
//!
//! Queries are built once per repository from the configured table names and
//! run as prepared statements through SQLx.
//!
//! # Repositories
//!
//! - [`PgCounterRepository`] - Upsert-based atomic counter
//! - [`PgMappingRepository`] - Conditional insert and point lookup

pub mod identifier;
pub mod pg_counter_repository;
pub mod pg_mapping_repository;

pub use pg_counter_repository::PgCounterRepository;
pub use pg_mapping_repository::PgMappingRepository;
