//! Typed key accessors for kvconf stores.
//!
//! A [`Key<T>`] binds an entry name and a default value to a static type.
//! Reading through it coerces whatever [`Value`](kvconf_types::Value) the
//! store holds into `T`:
//!
//! 1. absent entry → the default (or [`KeyError::KeyNotFound`])
//! 2. the value already has the kind `T` stores as → returned as is
//! 3. bool ↔ string → `"true"`/`"false"` and boolean literals
//! 4. numeric ↔ numeric → an `as` conversion between the widths
//! 5. anything else → the default (or [`KeyError::Cast`])
//!
//! Every permitted conversion is listed in the [`KeyType`] impls in
//! [`coerce`]. [`TimeKey`] layers RFC 3339 timestamps on top of string
//! entries.
//!
//! ```no_run
//! use kvconf_codec::CodecKind;
//! use kvconf_keys::Key;
//! use kvconf_store::ConfigStore;
//!
//! const PORT: Key<u16> = Key::from_static("port", 8080);
//!
//! let store = ConfigStore::load("server.cfg", CodecKind::Line)?;
//! PORT.sync(&store);
//! let port = PORT.get(&store);
//! store.save()?;
//! # Ok::<(), kvconf_store::StoreError>(())
//! ```

pub mod coerce;
pub mod error;
pub mod key;
pub mod time_key;

pub use coerce::{parse_bool_literal, Coercion, KeyType};
pub use error::{KeyError, KeyResult};
pub use key::Key;
pub use time_key::TimeKey;
