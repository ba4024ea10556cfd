//! On-disk encodings for kvconf stores.
//!
//! A store is persisted as one flat name → value mapping. Two interchangeable
//! codecs translate that mapping to and from bytes:
//!
//! - [`JsonCodec`] -- one JSON object; nested arrays and objects are kept.
//! - [`LineCodec`] -- `key=value` lines with `#` comments; scalars only.
//!
//! [`CodecKind`] selects a codec. Unrecognized selectors resolve to
//! [`CodecKind::Json`].
//!
//! # Design Rules
//!
//! 1. Decoding never merges: the result is exactly what the bytes describe.
//! 2. Both codecs decode every number as a 64-bit float.
//! 3. The line codec silently drops entries it cannot express; that loss is
//!    part of the format, not an error.
//! 4. Encoding output is ordered by key.

pub mod error;
pub mod json;
pub mod kind;
pub mod line;
pub mod traits;

pub use error::{CodecError, CodecResult};
pub use json::JsonCodec;
pub use kind::CodecKind;
pub use line::LineCodec;
pub use traits::Codec;
