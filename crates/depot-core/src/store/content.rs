//! Content blob store.
//!
//! Persists the raw payload per composite key, zstd-compressed at rest. The
//! stored frame is a little-endian CRC32 of the compressed bytes followed by
//! the compressed bytes themselves, so corruption surfaces as an explicit
//! backend failure on load instead of a decoder panic or truncated output.

use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use depot_model::{DepotError, DepotResult};

use crate::backend::KeyValueBackend;

/// zstd compression level for stored content.
const COMPRESSION_LEVEL: i32 = 3;

/// Length of the checksum prefix in the at-rest frame.
const CHECKSUM_LEN: usize = 4;

/// Compressed-blob-per-key store for object content.
#[derive(Debug, Clone)]
pub struct ContentStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl ContentStore {
    /// Create a store on top of the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Upsert the content for a key, replacing any prior blob.
    pub async fn store(&self, key: &str, content: &Bytes) -> DepotResult<()> {
        let compressed = zstd::encode_all(&content[..], COMPRESSION_LEVEL)
            .map_err(|e| DepotError::backend(&format!("compressing content for {key}"), e))?;

        let mut frame = BytesMut::with_capacity(CHECKSUM_LEN + compressed.len());
        frame.put_u32_le(crc32fast::hash(&compressed));
        frame.put_slice(&compressed);

        trace!(
            key,
            raw_len = content.len(),
            stored_len = frame.len(),
            "storing compressed content"
        );
        self.backend.put(key, frame.freeze()).await
    }

    /// Load and decompress the content for a key.
    ///
    /// # Errors
    ///
    /// - [`DepotError::NotFound`] if no blob is stored under the key.
    /// - [`DepotError::Backend`] if the frame is truncated, fails its
    ///   checksum, or does not decompress.
    pub async fn load(&self, key: &str) -> DepotResult<Bytes> {
        let mut frame = self
            .backend
            .get(key)
            .await?
            .ok_or_else(|| DepotError::NotFound {
                key: key.to_owned(),
            })?;

        if frame.len() < CHECKSUM_LEN {
            return Err(DepotError::Backend {
                message: format!("content frame for {key} is truncated ({} bytes)", frame.len()),
            });
        }

        let mut header = frame.split_to(CHECKSUM_LEN);
        let expected = header.get_u32_le();
        let actual = crc32fast::hash(&frame);
        if actual != expected {
            return Err(DepotError::Backend {
                message: format!(
                    "content checksum mismatch for {key}: expected {expected:08x}, got {actual:08x}"
                ),
            });
        }

        let decompressed = zstd::decode_all(&frame[..])
            .map_err(|e| DepotError::backend(&format!("decompressing content for {key}"), e))?;
        Ok(Bytes::from(decompressed))
    }

    /// Remove the content for a key. Succeeds if the key is already absent.
    pub async fn delete(&self, key: &str) -> DepotResult<()> {
        self.backend.delete(key).await
    }

    /// Check whether content is stored under the key.
    pub async fn exists(&self, key: &str) -> DepotResult<bool> {
        self.backend.exists(key).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
