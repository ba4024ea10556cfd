use kvconf_types::ValueMap;

use crate::error::CodecResult;
use crate::kind::CodecKind;

/// A paired encode/decode strategy for one on-disk format.
///
/// Implementations are stateless; a store holds a [`CodecKind`] and asks it
/// for the codec on every load and save.
pub trait Codec: Send + Sync {
    /// The selector that resolves to this codec.
    fn kind(&self) -> CodecKind;

    /// Decode a whole file into a mapping.
    fn decode(&self, data: &[u8]) -> CodecResult<ValueMap>;

    /// Encode a whole mapping into file contents.
    fn encode(&self, values: &ValueMap) -> CodecResult<Vec<u8>>;
}
