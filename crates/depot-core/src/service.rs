//! Object lifecycle orchestration.
//!
//! [`ObjectService`] composes the key codec, metadata store, and content
//! store into the object-facing operations: create, read, update, touch,
//! delete, plus folder and object enumeration. It owns the cross-store
//! invariant: an object is "found" only when both stores hold its key, and a
//! key present on exactly one side is reported as an inconsistency, never as
//! a plain miss.
//!
//! There is no atomicity across the two stores. Writes go metadata first,
//! then content; a failure between the two leaves a half-written object that
//! later reads surface as [`DepotError::Inconsistent`].

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use depot_model::{
    DepotError, DepotResult, ObjectMeta, ObjectPayload, ObjectSummary, StoreSide,
    default_content_type,
};

use crate::backend::{FileBackend, KeyValueBackend, MemoryBackend};
use crate::config::DepotConfig;
use crate::keys;
use crate::store::{ContentStore, MetadataStore};

/// The object store service.
///
/// Cheap to share: both stores hold `Arc`s to their backends, so the service
/// itself can be cloned or wrapped in an `Arc` and called concurrently from
/// request-handling tasks without further coordination.
#[derive(Debug, Clone)]
pub struct ObjectService {
    metadata: MetadataStore,
    content: ContentStore,
}

impl ObjectService {
    /// Build a service per the configuration.
    ///
    /// With `persistent = true` (the default) both stores live under
    /// [`DepotConfig::data_dir`]; otherwise everything is kept in memory and
    /// lost on restart.
    pub async fn new(config: &DepotConfig) -> DepotResult<Self> {
        if config.persistent {
            let metadata = FileBackend::open(config.metadata_dir()).await?;
            let content = FileBackend::open(config.content_dir()).await?;
            info!(data_dir = %config.data_dir, "opened file-backed object stores");
            Ok(Self::with_backends(Arc::new(metadata), Arc::new(content)))
        } else {
            warn!("persistence disabled, objects are kept in memory only");
            Ok(Self::in_memory())
        }
    }

    /// Build a service over explicit backends.
    #[must_use]
    pub fn with_backends(
        metadata: Arc<dyn KeyValueBackend>,
        content: Arc<dyn KeyValueBackend>,
    ) -> Self {
        Self {
            metadata: MetadataStore::new(metadata),
            content: ContentStore::new(content),
        }
    }

    /// Build a fully in-memory service.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backends(Arc::new(MemoryBackend::new()), Arc::new(MemoryBackend::new()))
    }

    /// Mint the identifier for a new object.
    ///
    /// A v4 UUID carries 122 random bits, so collisions are a non-concern
    /// and create never checks the key space before writing.
    fn generate_object_id() -> String {
        Uuid::new_v4().to_string()
    }

    // -----------------------------------------------------------------------
    // Lifecycle operations
    // -----------------------------------------------------------------------

    /// Store a new object and return its freshly minted identifier.
    ///
    /// Writes the metadata record first, then the content blob. Both
    /// timestamps start at now; absent content type and name are stored as
    /// their defaults.
    ///
    /// # Errors
    ///
    /// - [`DepotError::InvalidFolder`] if the folder name is empty or
    ///   contains the reserved separator.
    /// - [`DepotError::Backend`] if either write fails. A failure after the
    ///   metadata write leaves a half-written object that later reads report
    ///   as inconsistent.
    pub async fn create_object(&self, folder: &str, payload: ObjectPayload) -> DepotResult<String> {
        let id = Self::generate_object_id();
        let key = keys::compose(folder, &id)?;
        let size = payload.content.len();

        let meta = ObjectMeta::new(payload.content_type, payload.name);
        self.metadata.store(&key, &meta).await?;
        self.content.store(&key, &payload.content).await?;

        info!(folder, id = %id, size, "object created");
        Ok(id)
    }

    /// Fetch an object's metadata and content.
    ///
    /// A successful read is side-effecting: `accessed_at` is refreshed and
    /// durably persisted before the call returns, and the returned record
    /// carries the refreshed value.
    ///
    /// # Errors
    ///
    /// - [`DepotError::NotFound`] if neither store holds the key.
    /// - [`DepotError::Inconsistent`] if exactly one store holds the key.
    pub async fn read_object(&self, folder: &str, id: &str) -> DepotResult<(ObjectMeta, Bytes)> {
        let key = keys::compose(folder, id)?;
        self.check_presence(&key).await?;

        let meta = self.touch_key(&key).await?;
        let content = self.content.load(&key).await?;

        debug!(folder, id, size = content.len(), "object read");
        Ok((meta, content))
    }

    /// Replace an existing object's content and metadata.
    ///
    /// Update never creates: the object must already exist in both stores.
    /// `created_at` is preserved; `accessed_at` becomes now; content type and
    /// name are overwritten with the payload's values (or their defaults when
    /// absent). Returns the merged record.
    ///
    /// # Errors
    ///
    /// - [`DepotError::NotFound`] if neither store holds the key.
    /// - [`DepotError::Inconsistent`] if exactly one store holds the key.
    pub async fn update_object(
        &self,
        folder: &str,
        id: &str,
        payload: ObjectPayload,
    ) -> DepotResult<ObjectMeta> {
        let key = keys::compose(folder, id)?;
        self.check_presence(&key).await?;

        let mut meta = self.metadata.load(&key).await?;
        meta.accessed_at = Utc::now();
        meta.content_type = payload.content_type.unwrap_or_else(default_content_type);
        meta.name = payload.name.unwrap_or_default();

        self.metadata.store(&key, &meta).await?;
        self.content.store(&key, &payload.content).await?;

        info!(folder, id, size = payload.content.len(), "object updated");
        Ok(meta)
    }

    /// Refresh an object's access time and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] if no metadata record exists for the
    /// object.
    pub async fn touch_object(&self, folder: &str, id: &str) -> DepotResult<ObjectMeta> {
        let key = keys::compose(folder, id)?;
        let meta = self.touch_key(&key).await?;
        debug!(folder, id, "object touched");
        Ok(meta)
    }

    /// Remove an object from both stores.
    ///
    /// Deliberately tolerant: deleting an absent object is a success, so the
    /// operation is idempotent and can also clear half-written objects.
    ///
    /// # Errors
    ///
    /// - [`DepotError::InvalidFolder`] if the folder name is invalid.
    /// - [`DepotError::Backend`] if either store's delete fails.
    pub async fn delete_object(&self, folder: &str, id: &str) -> DepotResult<()> {
        let key = keys::compose(folder, id)?;
        self.metadata.delete(&key).await?;
        self.content.delete(&key).await?;

        info!(folder, id, "object deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Enumeration operations
    // -----------------------------------------------------------------------

    /// List every folder that currently holds at least one object.
    ///
    /// Folders are a derived view over the stored keys: the result is
    /// lexicographically sorted, deduplicated, and a folder disappears the
    /// moment its last object is deleted.
    pub async fn list_folders(&self) -> DepotResult<Vec<String>> {
        self.metadata.folders().await
    }

    /// List the objects in a folder, sorted by identifier.
    ///
    /// A folder with no objects yields an empty list, not an error, matching
    /// the derived-view model in which such a folder simply does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Inconsistent`] if a listed key's metadata record
    /// cannot be loaded or its content blob is missing. Half-present objects
    /// are surfaced, never silently skipped.
    pub async fn list_objects(&self, folder: &str) -> DepotResult<Vec<ObjectSummary>> {
        let folder_keys = self.metadata.keys_in_folder(folder).await?;

        let mut summaries = Vec::with_capacity(folder_keys.len());
        for key in &folder_keys {
            let (_, id) = keys::decompose(key)?;

            let meta = self.metadata.load(key).await.map_err(|e| match e {
                // The key was listed but its record is gone: half an object.
                DepotError::NotFound { key } => {
                    warn!(key = %key, "metadata record vanished during listing");
                    DepotError::Inconsistent {
                        key,
                        missing: StoreSide::Metadata,
                    }
                }
                other => other,
            })?;

            if !self.content.exists(key).await? {
                warn!(key = %key, "content blob missing for listed object");
                return Err(DepotError::Inconsistent {
                    key: key.clone(),
                    missing: StoreSide::Content,
                });
            }

            summaries.push(ObjectSummary::from_meta(id, &meta));
        }

        debug!(folder, count = summaries.len(), "listed objects");
        Ok(summaries)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Require the key to be present in both stores.
    async fn check_presence(&self, key: &str) -> DepotResult<()> {
        let has_metadata = self.metadata.exists(key).await?;
        let has_content = self.content.exists(key).await?;

        match (has_metadata, has_content) {
            (true, true) => Ok(()),
            (false, false) => Err(DepotError::NotFound {
                key: key.to_owned(),
            }),
            (true, false) => {
                warn!(key, "content blob missing for existing metadata");
                Err(DepotError::Inconsistent {
                    key: key.to_owned(),
                    missing: StoreSide::Content,
                })
            }
            (false, true) => {
                warn!(key, "metadata record missing for existing content");
                Err(DepotError::Inconsistent {
                    key: key.to_owned(),
                    missing: StoreSide::Metadata,
                })
            }
        }
    }

    /// Load the record under `key`, stamp `accessed_at`, persist, return it.
    async fn touch_key(&self, key: &str) -> DepotResult<ObjectMeta> {
        let mut meta = self.metadata.load(key).await?;
        meta.accessed_at = Utc::now();
        self.metadata.store(key, &meta).await?;
        Ok(meta)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
