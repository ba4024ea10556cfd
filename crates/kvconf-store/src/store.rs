use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kvconf_codec::CodecKind;
use kvconf_types::{Value, ValueMap};
use tracing::{debug, trace};

use crate::backend::{FileBackend, FsBackend, MemoryBackend};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// In-memory configuration store bound to one file.
///
/// All entries live behind a single `RwLock`. Lookups take the read lock;
/// mutations, snapshots and saves take the write lock. A store is `Sync`
/// and is shared across threads through an `Arc`.
pub struct ConfigStore {
    values: RwLock<ValueMap>,
    path: PathBuf,
    codec: CodecKind,
    backend: Arc<dyn FileBackend>,
}

impl ConfigStore {
    /// Load the store at `path` from the local file system.
    ///
    /// A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>, codec: CodecKind) -> StoreResult<Self> {
        Self::load_with(Arc::new(FsBackend::default()), path, codec)
    }

    /// Load the store described by `config` from the local file system.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        Self::load_with(
            Arc::new(FsBackend::new(config.create_dirs)),
            &config.path,
            config.codec,
        )
    }

    /// Load the store at `path` through an arbitrary backend.
    pub fn load_with(
        backend: Arc<dyn FileBackend>,
        path: impl AsRef<Path>,
        codec: CodecKind,
    ) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match backend.read(&path) {
            Ok(Some(data)) => codec
                .codec()
                .decode(&data)
                .map_err(|source| StoreError::Codec {
                    path: path.clone(),
                    source,
                })?,
            Ok(None) => {
                debug!(path = %path.display(), "config file absent, starting empty");
                ValueMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(
            path = %path.display(),
            codec = %codec,
            entries = values.len(),
            "loaded config"
        );
        Ok(Self {
            values: RwLock::new(values),
            path,
            codec,
            backend,
        })
    }

    /// Create an empty store persisted to a private in-memory backend.
    pub fn in_memory(codec: CodecKind) -> Self {
        Self {
            values: RwLock::new(ValueMap::new()),
            path: PathBuf::from("memory"),
            codec,
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    // Poisoning is ignored: the mapping has no cross-entry invariant.
    fn read_values(&self) -> RwLockReadGuard<'_, ValueMap> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_values(&self) -> RwLockWriteGuard<'_, ValueMap> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<Value> {
        let value = self.read_values().get(key).cloned();
        trace!(key, found = value.is_some(), "config get");
        value
    }

    /// Insert or overwrite an entry. The new value may be of a different
    /// kind than the old one.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        trace!(key = %key, "config put");
        self.write_values().insert(key, value.into());
    }

    /// Insert or overwrite an entry only if `should_write` approves the
    /// current value (`None` when absent). The check and the write happen
    /// under one write lock. Returns whether the entry was written.
    pub fn put_if<F>(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
        should_write: F,
    ) -> bool
    where
        F: FnOnce(Option<&Value>) -> bool,
    {
        let key = key.into();
        let mut values = self.write_values();
        if !should_write(values.get(&key)) {
            return false;
        }
        trace!(key = %key, "config conditional put");
        values.insert(key, value.into());
        true
    }

    /// Remove an entry, returning its value if it existed.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write_values().remove(key)
    }

    /// Copy of the whole mapping.
    ///
    /// Taken under the write lock so no writer can interleave with the copy.
    pub fn get_copy_of_config(&self) -> ValueMap {
        self.write_values().clone()
    }

    /// Encode the whole mapping and overwrite the backing file.
    ///
    /// The write lock is held for the encode and the write, so concurrent
    /// `get` and `put` calls wait until the file is written. A failure in
    /// the middle of the write can leave a partial file behind.
    pub fn save(&self) -> StoreResult<()> {
        let values = self.write_values();
        let data = self
            .codec
            .codec()
            .encode(&values)
            .map_err(|source| StoreError::Codec {
                path: self.path.clone(),
                source,
            })?;
        self.backend
            .write(&self.path, &data)
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %self.path.display(),
            codec = %self.codec,
            entries = values.len(),
            bytes = data.len(),
            "saved config"
        );
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.read_values().len()
    }

    /// Returns `true` if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.read_values().is_empty()
    }

    /// All entry names, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.read_values().keys().cloned().collect()
    }

    /// Returns `true` if an entry named `key` exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read_values().contains_key(key)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoding used for load and save.
    pub fn codec_kind(&self) -> CodecKind {
        self.codec
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("codec", &self.codec)
            .field("entry_count", &self.len())
            .finish()
    }
}
