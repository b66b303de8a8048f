//! Metadata record store.
//!
//! Persists one JSON [`ObjectMeta`] document per composite key and derives
//! the folder namespace from the stored keys. There is no folder table:
//! a folder exists exactly while at least one key carries its prefix.

use std::sync::Arc;

use tracing::debug;

use depot_model::{DepotError, DepotResult, ObjectMeta};

use crate::backend::KeyValueBackend;
use crate::keys;

/// JSON-per-key store for object metadata records.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl MetadataStore {
    /// Create a store on top of the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Upsert the record for a key, replacing any prior record entirely.
    pub async fn store(&self, key: &str, record: &ObjectMeta) -> DepotResult<()> {
        let document = serde_json::to_vec(record)
            .map_err(|e| DepotError::backend(&format!("serializing metadata for {key}"), e))?;
        self.backend.put(key, document.into()).await
    }

    /// Load the record for a key.
    ///
    /// # Errors
    ///
    /// - [`DepotError::NotFound`] if no record is stored under the key.
    /// - [`DepotError::Backend`] if the stored document does not parse as a
    ///   complete [`ObjectMeta`].
    pub async fn load(&self, key: &str) -> DepotResult<ObjectMeta> {
        let document = self
            .backend
            .get(key)
            .await?
            .ok_or_else(|| DepotError::NotFound {
                key: key.to_owned(),
            })?;

        serde_json::from_slice(&document)
            .map_err(|e| DepotError::backend(&format!("parsing metadata for {key}"), e))
    }

    /// Remove the record for a key. Succeeds if the key is already absent.
    pub async fn delete(&self, key: &str) -> DepotResult<()> {
        self.backend.delete(key).await
    }

    /// Check whether a record is stored under the key.
    pub async fn exists(&self, key: &str) -> DepotResult<bool> {
        self.backend.exists(key).await
    }

    /// List the composite keys whose folder segment equals `folder`, sorted.
    ///
    /// Matching is by decomposed folder equality, not raw prefix, so folder
    /// `"a"` never picks up keys belonging to folder `"ab"`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::MalformedKey`] if the backend holds a key that
    /// cannot be decomposed; a key space that no longer round-trips is an
    /// integrity fault, not something to paper over.
    pub async fn keys_in_folder(&self, folder: &str) -> DepotResult<Vec<String>> {
        let mut matching = Vec::new();
        for key in self.backend.keys().await? {
            let (key_folder, _) = keys::decompose(&key)?;
            if key_folder == folder {
                matching.push(key);
            }
        }
        debug!(folder, count = matching.len(), "listed keys in folder");
        Ok(matching)
    }

    /// List every distinct folder, lexicographically sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::MalformedKey`] if the backend holds a key that
    /// cannot be decomposed.
    pub async fn folders(&self) -> DepotResult<Vec<String>> {
        let mut folders = Vec::new();
        for key in self.backend.keys().await? {
            let (folder, _) = keys::decompose(&key)?;
            folders.push(folder.to_owned());
        }
        folders.sort();
        folders.dedup();
        Ok(folders)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
