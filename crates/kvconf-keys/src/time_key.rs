use std::borrow::Cow;

use kvconf_store::ConfigStore;
use kvconf_types::{format_timestamp, parse_timestamp, Timestamp};
use tracing::trace;

use crate::coerce::KeyType;
use crate::error::{KeyError, KeyResult};
use crate::key::Key;

/// A typed binding for entries holding RFC 3339 timestamps.
///
/// The entry is read as a string through a `Key<String>` with an empty
/// default and then parsed. Absent, uncoercible and unparsable entries all
/// yield this key's own default from [`TimeKey::get`].
#[derive(Clone, Debug, PartialEq)]
pub struct TimeKey {
    name: Cow<'static, str>,
    default: Timestamp,
}

impl TimeKey {
    pub fn new(name: impl Into<Cow<'static, str>>, default: Timestamp) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &Timestamp {
        &self.default
    }

    fn text_key(&self) -> Key<String> {
        Key::new(self.name.clone(), String::new())
    }

    /// Read the entry as a timestamp, falling back to the default.
    pub fn get(&self, store: &ConfigStore) -> Timestamp {
        self.get_err(store).unwrap_or_else(|err| {
            trace!(key = %self.name, error = %err, "using default timestamp");
            self.default
        })
    }

    /// Read the entry as a timestamp, reporting absence, a non-string
    /// entry, or unparsable text.
    pub fn get_err(&self, store: &ConfigStore) -> KeyResult<Timestamp> {
        let text = self.text_key().get_err(store)?;
        parse_timestamp(&text).map_err(|source| KeyError::Timestamp {
            key: self.name.to_string(),
            source,
        })
    }

    /// Store `value` as RFC 3339 text.
    pub fn put(&self, store: &ConfigStore, value: Timestamp) {
        self.text_key().put(store, format_timestamp(&value));
    }

    /// Write the default if [`TimeKey::get_err`] would fail; otherwise leave
    /// the entry alone. Returns whether the default was written.
    pub fn sync(&self, store: &ConfigStore) -> bool {
        store.put_if(
            self.name.to_string(),
            format_timestamp(&self.default),
            |current| {
                current
                    .and_then(String::coerce)
                    .map_or(true, |(text, _)| parse_timestamp(&text).is_err())
            },
        )
    }
}
