//! Validation of configured table names.
//!
//! Table names come from configuration and are spliced into SQL text, so they
//! are restricted to plain identifiers.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::repositories::StoreError;

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").unwrap());

/// Returns true if `name` is usable as an unquoted PostgreSQL identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Checks a table name before it is used in a query.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] for anything but a plain identifier.
pub fn checked_table_name(name: &str) -> Result<&str, StoreError> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(StoreError::backend(format!("invalid table name '{}'", name)))
    }
}
