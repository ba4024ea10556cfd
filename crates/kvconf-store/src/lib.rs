//! Concurrency-safe configuration store backed by a single file.
//!
//! A [`ConfigStore`] holds a name → [`Value`](kvconf_types::Value) mapping in
//! memory behind one readers-writer lock, and knows the file path and
//! [`CodecKind`](kvconf_codec::CodecKind) it was loaded with.
//!
//! # Storage Backends
//!
//! File access goes through the [`FileBackend`] trait:
//!
//! - [`FsBackend`] -- the local file system
//! - [`MemoryBackend`] -- `HashMap`-based files for tests and embedding
//!
//! # Design Rules
//!
//! 1. A missing file is an empty configuration, never an error.
//! 2. Every other I/O or decode failure on load or save is returned.
//! 3. Save serializes the whole mapping and overwrites the file; there is no
//!    merge with what is on disk and no atomic rename.
//! 4. Save holds the writer lock for the full encode and write, so the file
//!    is a point-in-time snapshot of every put that finished before it.
//! 5. There is no cross-process locking: the last save wins.

pub mod backend;
pub mod config;
pub mod error;
pub mod store;

pub use backend::{FileBackend, FsBackend, MemoryBackend};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::ConfigStore;
