//! File-per-key backend.
//!
//! Each key becomes one file directly under the backend's root directory.
//! Keys are percent-encoded into filenames so path separators and other
//! filesystem-hostile characters in folder names cannot escape the root.
//! Writes go to a hidden temp file first and are renamed into place, so a
//! committed key is always a complete value.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use depot_model::{DepotError, DepotResult};

use super::KeyValueBackend;

/// Characters escaped when turning a key into a filename.
///
/// Path separators and `%` itself must be escaped for correctness; the rest
/// are characters some filesystems or shells mishandle.
const FILENAME_ESCAPE: &AsciiSet = &CONTROLS
    .add(b'%')
    .add(b'/')
    .add(b'\\')
    .add(b':')
    .add(b'*')
    .add(b'?')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'|');

/// Prefix for in-flight temp files. Encoded keys never start with a dot, so
/// dotfiles are reserved for the backend itself.
const TMP_PREFIX: &str = ".tmp-";

/// One-file-per-key store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> DepotResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| DepotError::backend("creating backend root directory", e))?;
        debug!(root = %root.display(), "opened file backend");
        Ok(Self { root })
    }

    /// The directory this backend stores its files in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(encode_key(key))
    }
}

/// Percent-encode a key into a safe filename.
///
/// A leading dot is escaped as well, keeping dotfile names reserved for the
/// backend's own temp files.
fn encode_key(key: &str) -> String {
    let encoded = utf8_percent_encode(key, FILENAME_ESCAPE).to_string();
    match encoded.strip_prefix('.') {
        Some(rest) => format!("%2E{rest}"),
        None => encoded,
    }
}

/// Reverse [`encode_key`]. Returns `None` for filenames that are not valid
/// percent-encoded UTF-8 (foreign files in the data directory).
fn decode_filename(name: &str) -> Option<String> {
    percent_decode_str(name)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn put(&self, key: &str, value: Bytes) -> DepotResult<()> {
        let path = self.path_for(key);
        let tmp_path = self.root.join(format!("{TMP_PREFIX}{}", Uuid::new_v4()));

        fs::write(&tmp_path, &value)
            .await
            .map_err(|e| DepotError::backend(&format!("writing {key}"), e))?;

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            // Best effort: do not leave the temp file behind.
            let _ = fs::remove_file(&tmp_path).await;
            return Err(DepotError::backend(&format!("committing {key}"), e));
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> DepotResult<Option<Bytes>> {
        match fs::read(self.path_for(key)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DepotError::backend(&format!("reading {key}"), e)),
        }
    }

    async fn delete(&self, key: &str) -> DepotResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DepotError::backend(&format!("deleting {key}"), e)),
        }
    }

    async fn exists(&self, key: &str) -> DepotResult<bool> {
        fs::try_exists(self.path_for(key))
            .await
            .map_err(|e| DepotError::backend(&format!("checking {key}"), e))
    }

    async fn keys(&self) -> DepotResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| DepotError::backend("listing backend root directory", e))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DepotError::backend("listing backend root directory", e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| DepotError::backend("listing backend root directory", e))?;
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!(entry = ?name, "skipping non-UTF-8 filename in data directory");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            match decode_filename(name) {
                Some(key) => keys.push(key),
                None => warn!(entry = name, "skipping undecodable filename in data directory"),
            }
        }

        keys.sort();
        Ok(keys)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
