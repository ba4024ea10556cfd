use std::io;
use std::path::PathBuf;

use kvconf_codec::CodecError;

/// Errors from loading or saving a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed (other than the file
    /// being absent on load).
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file contents could not be decoded, or the mapping could not be
    /// encoded.
    #[error("codec error on {}: {source}", .path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

impl StoreError {
    /// Returns `true` if the file was read but its contents are malformed.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Codec { source, .. } if source.is_decode())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
