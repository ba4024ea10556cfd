use std::borrow::Cow;

use kvconf_store::ConfigStore;
use tracing::trace;

use crate::coerce::{Coercion, KeyType};
use crate::error::{KeyError, KeyResult};

/// A typed binding of an entry name and a default value.
///
/// Keys hold no state of their own and can be declared once as constants:
///
/// ```
/// use kvconf_keys::Key;
///
/// const RETRIES: Key<u32> = Key::from_static("retries", 3);
/// assert_eq!(RETRIES.name(), "retries");
/// ```
///
/// Several keys may name the same entry with different types or defaults;
/// they do not interact.
#[derive(Clone, Debug, PartialEq)]
pub struct Key<T: KeyType> {
    name: Cow<'static, str>,
    default: T,
}

impl<T: KeyType> Key<T> {
    pub fn new(name: impl Into<Cow<'static, str>>, default: T) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    /// Const constructor for keys with a static name.
    pub const fn from_static(name: &'static str, default: T) -> Self {
        Self {
            name: Cow::Borrowed(name),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    fn lookup(&self, store: &ConfigStore) -> KeyResult<(T, Coercion)> {
        let raw = store
            .get(&self.name)
            .ok_or_else(|| KeyError::KeyNotFound(self.name.to_string()))?;
        T::coerce(&raw).ok_or_else(|| KeyError::Cast {
            key: self.name.to_string(),
            wanted: T::TYPE_NAME,
            actual: raw.kind(),
        })
    }

    /// Read the entry as `T`, falling back to the default when it is absent
    /// or cannot be coerced.
    pub fn get(&self, store: &ConfigStore) -> T {
        match self.lookup(store) {
            Ok((value, rule)) => {
                trace!(key = %self.name, wanted = T::TYPE_NAME, ?rule, "coerced");
                value
            }
            Err(err) => {
                trace!(key = %self.name, error = %err, "using default");
                self.default.clone()
            }
        }
    }

    /// Read the entry as `T`, reporting why when it is absent or cannot be
    /// coerced.
    pub fn get_err(&self, store: &ConfigStore) -> KeyResult<T> {
        self.lookup(store).map(|(value, _)| value)
    }

    /// Write `value` under this key's name.
    pub fn put(&self, store: &ConfigStore, value: T) {
        store.put(self.name.to_string(), value.into_value());
    }

    /// Write the default if the entry is absent or cannot be coerced to `T`;
    /// otherwise leave it alone. Returns whether the default was written.
    pub fn sync(&self, store: &ConfigStore) -> bool {
        store.put_if(
            self.name.to_string(),
            self.default.clone().into_value(),
            |current| current.map_or(true, |v| T::coerce(v).is_none()),
        )
    }
}
