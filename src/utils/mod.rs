//! Helpers used by the service and HTTP layers.
//!
//! - [`code_generator`] - BLAKE2b short code derivation
//! - [`client_ip`] - Caller identity from `X-Forwarded-For`

pub mod client_ip;
pub mod code_generator;
