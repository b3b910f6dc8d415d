//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlMapping`] - A short code to long URL mapping
//! - [`CounterRecord`] - The singleton counter the short codes are derived from
//!
//! Both entities live entirely in the backing store; the service keeps no
//! copy of them between requests.

pub mod counter;
pub mod url_mapping;

pub use counter::{CounterRecord, DEFAULT_COUNTER_ID};
pub use url_mapping::{PutOutcome, UrlMapping};
