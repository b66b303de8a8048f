//! Upload body parsing for create and update requests.
//!
//! Two encodings are accepted, selected by the request `Content-Type`:
//!
//! - `application/json` with the envelope
//!   `{"data": {"content": ..., "type": ..., "object_name": ...}}`, where
//!   `type` and `object_name` are optional.
//! - `multipart/form-data` with one part whose field name is `data`; the
//!   part's filename becomes the display name and the part's own
//!   `Content-Type` header becomes the content type.
//!
//! Anything else is rejected and rendered as a 400 by the response layer.

use bytes::Bytes;
use serde::Deserialize;

use depot_model::ObjectPayload;

use crate::multipart;

/// Why an upload body could not be parsed into a payload.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// The request `Content-Type` selects no supported decoder.
    #[error("unsupported content type for upload: {content_type}")]
    UnsupportedContentType {
        /// The declared content type, or `<none>` when the header is absent.
        content_type: String,
    },

    /// The body did not decode under the selected encoding.
    #[error("malformed upload body: {message}")]
    Malformed {
        /// What failed to decode.
        message: String,
    },

    /// A multipart body with no `data` field.
    #[error("multipart body is missing the data field")]
    MissingData,
}

/// The JSON upload envelope.
#[derive(Debug, Deserialize)]
struct UploadEnvelope {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    content: String,
    #[serde(rename = "type")]
    content_type: Option<String>,
    object_name: Option<String>,
}

/// Parse an upload request body into an object payload.
///
/// # Errors
///
/// Returns a [`BodyError`] if the content type is unsupported or the body
/// does not decode under it.
pub fn parse_payload(content_type: Option<&str>, body: &Bytes) -> Result<ObjectPayload, BodyError> {
    let Some(content_type) = content_type else {
        return Err(BodyError::UnsupportedContentType {
            content_type: "<none>".to_owned(),
        });
    };

    let lowered = content_type.to_ascii_lowercase();
    if lowered.starts_with("application/json") {
        parse_json_payload(body)
    } else if lowered.starts_with("multipart/form-data") {
        let boundary = multipart::extract_boundary(content_type)?;
        multipart::parse_data_part(body, &boundary)
    } else {
        Err(BodyError::UnsupportedContentType {
            content_type: content_type.to_owned(),
        })
    }
}

/// Decode the JSON envelope into a payload.
fn parse_json_payload(body: &Bytes) -> Result<ObjectPayload, BodyError> {
    let envelope: UploadEnvelope =
        serde_json::from_slice(body).map_err(|e| BodyError::Malformed {
            message: e.to_string(),
        })?;

    let UploadData {
        content,
        content_type,
        object_name,
    } = envelope.data;
    Ok(ObjectPayload::new(
        content.into_bytes(),
        content_type,
        object_name,
    ))
}
