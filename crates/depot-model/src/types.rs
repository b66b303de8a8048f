//! Object metadata, upload payload, and listing summary types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default media type recorded when an upload does not declare one.
#[must_use]
pub fn default_content_type() -> String {
    mime::APPLICATION_OCTET_STREAM.to_string()
}

/// Stored metadata record for one object.
///
/// One record per composite key, serialized as JSON in the metadata store.
/// `created_at` never changes after creation; `accessed_at` is refreshed on
/// every read and update. All four fields are always present in the persisted
/// document so a malformed record fails at load time instead of surfacing as
/// missing fields downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// When the object was created. Immutable after creation.
    pub created_at: DateTime<Utc>,
    /// When the object was last read or updated.
    pub accessed_at: DateTime<Utc>,
    /// Declared media type of the content.
    pub content_type: String,
    /// Display name, possibly empty.
    pub name: String,
}

impl ObjectMeta {
    /// Build a fresh record with both timestamps set to now.
    ///
    /// An absent content type falls back to `application/octet-stream`, an
    /// absent name to the empty string.
    #[must_use]
    pub fn new(content_type: Option<String>, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            accessed_at: now,
            content_type: content_type.unwrap_or_else(default_content_type),
            name: name.unwrap_or_default(),
        }
    }
}

/// Wire summary of one object, as returned by list and update responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// The object identifier within its folder.
    pub key: String,
    /// Display name, possibly empty.
    pub object_name: String,
    /// Declared media type of the content.
    pub content_type: String,
    /// When the object was created.
    pub created_at: DateTime<Utc>,
    /// When the object was last read or updated.
    pub accessed_at: DateTime<Utc>,
}

impl ObjectSummary {
    /// Combine an object identifier with its metadata record.
    #[must_use]
    pub fn from_meta(id: impl Into<String>, meta: &ObjectMeta) -> Self {
        Self {
            key: id.into(),
            object_name: meta.name.clone(),
            content_type: meta.content_type.clone(),
            created_at: meta.created_at,
            accessed_at: meta.accessed_at,
        }
    }
}

/// Parsed upload: payload bytes plus the optional declared type and name.
///
/// Produced by the HTTP adapter from a JSON or multipart request body and
/// consumed by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPayload {
    /// The raw content bytes.
    pub content: Bytes,
    /// Declared media type, if the upload carried one.
    pub content_type: Option<String>,
    /// Display name, if the upload carried one.
    pub name: Option<String>,
}

impl ObjectPayload {
    /// Assemble a payload from its parts.
    pub fn new(
        content: impl Into<Bytes>,
        content_type: Option<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            content: content.into(),
            content_type,
            name,
        }
    }
}
