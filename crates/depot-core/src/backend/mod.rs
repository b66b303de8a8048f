//! Flat key-value persistence beneath the metadata and content stores.
//!
//! Both stores share one backend abstraction: a string-keyed byte store with
//! wholesale-replace writes. Two implementations are provided:
//!
//! - [`FileBackend`] -- one file per key under a root directory (the default)
//! - [`MemoryBackend`] -- a `DashMap`, for tests and ephemeral deployments
//!
//! The backend knows nothing about composite keys, folders, compression, or
//! record shapes; all of that lives above it.

use async_trait::async_trait;
use bytes::Bytes;
use depot_model::DepotResult;

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Flat key-value byte store.
///
/// All implementations must satisfy these invariants:
/// - `put` replaces the value for a key wholesale; readers never observe a
///   partially-written value for a committed key.
/// - `delete` is idempotent and succeeds when the key is already absent.
/// - `keys` returns every stored key in lexicographic order.
/// - I/O errors are propagated as [`DepotError::Backend`], never swallowed.
///
/// [`DepotError::Backend`]: depot_model::DepotError::Backend
#[async_trait]
pub trait KeyValueBackend: Send + Sync + std::fmt::Debug {
    /// Store a value under a key, replacing any prior value.
    async fn put(&self, key: &str, value: Bytes) -> DepotResult<()>;

    /// Load the value stored under a key.
    ///
    /// Returns `Ok(None)` if the key is absent; absence is not an error at
    /// this layer.
    async fn get(&self, key: &str) -> DepotResult<Option<Bytes>>;

    /// Remove a key. Succeeds whether or not the key existed.
    async fn delete(&self, key: &str) -> DepotResult<()>;

    /// Check whether a key is present.
    async fn exists(&self, key: &str) -> DepotResult<bool>;

    /// List every stored key, lexicographically sorted.
    async fn keys(&self) -> DepotResult<Vec<String>>;
}
