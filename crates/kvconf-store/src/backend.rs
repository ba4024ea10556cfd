use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Byte-oriented access to the file a store is persisted in.
///
/// All implementations must satisfy these invariants:
/// - `read` returns `Ok(None)` when the file does not exist; any other
///   failure is an `Err`.
/// - `write` replaces the whole file (creating it if needed).
pub trait FileBackend: Send + Sync {
    /// Read the full contents of `path`.
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>>;

    /// Create or truncate `path` and write `data` to it.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Check whether `path` exists.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// Local file system backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsBackend {
    create_dirs: bool,
}

impl FsBackend {
    /// Create a backend. With `create_dirs`, missing parent directories are
    /// created on write.
    pub fn new(create_dirs: bool) -> Self {
        Self { create_dirs }
    }
}

impl FileBackend for FsBackend {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        if self.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, data)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

/// In-memory, HashMap-based backend.
///
/// Intended for tests and embedding. Can be switched to read-only to make
/// every write fail with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    read_only: RwLock<bool>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file into the backend.
    pub fn insert(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), data.into());
    }

    /// Contents of a file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_ref())
            .cloned()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.write().unwrap_or_else(PoisonError::into_inner) = read_only;
    }
}

impl FileBackend for MemoryBackend {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        Ok(self.contents(path))
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        if *self.read_only.read().unwrap_or_else(PoisonError::into_inner) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "backend is read-only",
            ));
        }
        self.insert(path, data);
        Ok(())
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self
            .files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path))
    }
}
