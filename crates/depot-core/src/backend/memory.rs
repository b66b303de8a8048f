//! In-memory backend.
//!
//! A `DashMap` standing in for the filesystem, used by tests and by
//! deployments that opt out of persistence. Same contract as
//! [`FileBackend`](super::FileBackend), nothing survives a restart.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use depot_model::DepotResult;

use super::KeyValueBackend;

/// Ephemeral key-value store backed by a concurrent map.
#[derive(Default)]
pub struct MemoryBackend {
    entries: DashMap<String, Bytes>,
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}

impl MemoryBackend {
    /// Create a new, empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn put(&self, key: &str, value: Bytes) -> DepotResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> DepotResult<Option<Bytes>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, key: &str) -> DepotResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> DepotResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    async fn keys(&self) -> DepotResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
