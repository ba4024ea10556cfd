use kvconf_types::{TypeError, ValueKind};
use thiserror::Error;

/// Errors from reading a store entry through a typed key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The store has no entry with this name.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The entry exists but its kind cannot be coerced to the key's type.
    #[error("key {key:?}: failed to cast value (wanted type: {wanted} but got type: {actual})")]
    Cast {
        key: String,
        wanted: &'static str,
        actual: ValueKind,
    },

    /// The entry is a string but not a valid timestamp.
    #[error("key {key:?}: {source}")]
    Timestamp {
        key: String,
        #[source]
        source: TypeError,
    },
}

/// Result alias for typed key operations.
pub type KeyResult<T> = Result<T, KeyError>;
