//! URL mapping entity stored in the mapping store.

/// A short code and the long URL it resolves to.
///
/// Mappings are written once by a successful shorten and never updated or
/// deleted afterwards, so the read path can treat `long_url` as immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
}

impl UrlMapping {
    /// Creates a new mapping.
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
        }
    }
}

/// Result of a conditional mapping insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The mapping was written.
    Created,
    /// A mapping with the same short code already exists and was left untouched.
    AlreadyExists,
}
