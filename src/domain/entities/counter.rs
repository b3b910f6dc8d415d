//! Singleton counter record backing short code derivation.

/// Default identifier of the singleton counter record.
pub const DEFAULT_COUNTER_ID: &str = "counter";

/// The singleton counter record.
///
/// The record is only ever mutated through the store's atomic increment and is
/// never read except through the value that increment returns. Its value is
/// monotonically non-decreasing across all successful increments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRecord {
    pub id: String,
    pub value: u64,
}

impl CounterRecord {
    /// Creates a counter record snapshot.
    pub fn new(id: impl Into<String>, value: u64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}
