//! Repository trait definitions for the backing store.
//!
//! The service talks to exactly two logical stores: a singleton atomic counter
//! and a code-keyed mapping table. Both are abstracted here so the application
//! layer can wrap them in retrying clients without knowing the backend.
//!
//! # Available Repositories
//!
//! - [`CounterRepository`] - Atomic increment of the singleton counter
//! - [`MappingRepository`] - Conditional put and point lookup of mappings
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod counter_repository;
pub mod mapping_repository;
pub mod store_error;

pub use counter_repository::CounterRepository;
pub use mapping_repository::MappingRepository;
pub use store_error::StoreError;

#[cfg(test)]
pub use counter_repository::MockCounterRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
