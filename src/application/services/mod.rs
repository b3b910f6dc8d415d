//! Services for the application layer.
//!
//! - [`CounterClient`] / [`MappingClient`] wrap the store traits in the shared
//!   [`RetryPolicy`](crate::application::retry::RetryPolicy)
//! - [`ShortenerService`] orchestrates shorten and unshorten on top of them

pub mod counter_client;
pub mod error;
pub mod mapping_client;
pub mod shortener_service;

pub use counter_client::CounterClient;
pub use error::ServiceError;
pub use mapping_client::MappingClient;
pub use shortener_service::{DEFAULT_COLLISION_RETRIES, ShortenedUrl, ShortenerService};
