use std::io;

use kvconf_types::TypeError;

/// Errors from encoding or decoding a store's file contents.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The file is not valid JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is valid JSON but its top-level value is not an object.
    #[error("top-level JSON value must be an object, found {0}")]
    NotAnObject(&'static str),

    /// A line of a `key=value` file could not be read.
    #[error("line {line}: {reason}")]
    Line { line: usize, reason: String },

    /// An entry holds a value the encoding cannot represent.
    #[error("cannot encode entry {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: TypeError,
    },

    /// I/O error while producing encoded output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Returns `true` if the error came from reading malformed input, as
    /// opposed to failing to write a value out.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_) | Self::NotAnObject(_) | Self::Line { .. })
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
