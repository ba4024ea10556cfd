//! Foundation types for kvconf.
//!
//! Every entry of a configuration store holds a [`Value`], a tagged union
//! over the small closed set of kinds the on-disk encodings can carry.
//! Typed accessors in `kvconf-keys` coerce these values into static types.
//!
//! # Key Types
//!
//! - [`Value`] — a dynamically-kinded configuration value
//! - [`ValueKind`] — the kind tag of a [`Value`], used in diagnostics
//! - [`ValueMap`] — a name → value mapping (the shape of a whole store)
//! - [`Timestamp`] — a point in time with its UTC offset, stored as RFC 3339 text

pub mod error;
pub mod temporal;
pub mod value;

pub use error::TypeError;
pub use temporal::{format_timestamp, parse_timestamp, Timestamp};
pub use value::{Value, ValueKind, ValueMap};
