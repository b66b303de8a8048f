//! Response rendering: success bodies, error bodies, and read headers.
//!
//! Success responses are JSON except for `ReadObject`, which returns the raw
//! decompressed content with download-oriented headers. Errors always render
//! as `{"error": {"kind": ..., "message": ...}}` with a status derived from
//! the error kind.

use bytes::Bytes;

use depot_model::{DepotError, ObjectMeta};

use crate::body::DepotResponseBody;
use crate::dispatch::OperationOutput;
use crate::request::BodyError;
use crate::router::RouteError;

/// Content type for depot JSON responses.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Cache directive attached to read responses, so intermediaries never serve
/// stale object content.
pub const READ_CACHE_CONTROL: &str = "no-cache, no-store";

/// Render an operation's output into a complete HTTP response.
#[must_use]
pub fn render_output(output: OperationOutput) -> http::Response<DepotResponseBody> {
    match output {
        OperationOutput::Folders(folders) => json_response(serialize(&folders)),
        OperationOutput::Objects(objects) => json_response(serialize(&objects)),
        OperationOutput::Created(id) | OperationOutput::Deleted(id) => {
            json_response(serialize(&id))
        }
        OperationOutput::Updated(summary) => json_response(serialize(&summary)),
        OperationOutput::Read { meta, content } => read_response(&meta, content),
    }
}

/// Build a 200 response from JSON bytes.
#[must_use]
pub fn json_response(json: Vec<u8>) -> http::Response<DepotResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(DepotResponseBody::from_json(json))
        .expect("valid JSON response")
}

/// Build the raw-content response for a read.
///
/// Carries the stored content type, `Cache-Control: no-cache, no-store`, and
/// an attachment `Content-Disposition` when the object has a display name.
fn read_response(meta: &ObjectMeta, content: Bytes) -> http::Response<DepotResponseBody> {
    let mut builder = http::Response::builder()
        .status(http::StatusCode::OK)
        .header(
            http::header::CONTENT_TYPE,
            content_type_value(&meta.content_type),
        )
        .header(http::header::CACHE_CONTROL, READ_CACHE_CONTROL);

    if let Some(disposition) = content_disposition_value(&meta.name) {
        builder = builder.header(http::header::CONTENT_DISPOSITION, disposition);
    }

    builder
        .body(DepotResponseBody::from_bytes(content))
        .expect("valid read response")
}

/// Header value for the stored content type, falling back to the default
/// when the stored string cannot form a valid header.
fn content_type_value(content_type: &str) -> http::HeaderValue {
    http::HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| http::HeaderValue::from_static("application/octet-stream"))
}

/// `attachment; filename="..."` for a non-empty display name.
///
/// Quotes and backslashes in the name are escaped. A name that still cannot
/// form a valid header value (control bytes, non-ASCII) degrades to a bare
/// `attachment`.
fn content_disposition_value(name: &str) -> Option<http::HeaderValue> {
    if name.is_empty() {
        return None;
    }

    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    http::HeaderValue::from_str(&format!("attachment; filename=\"{escaped}\""))
        .ok()
        .or_else(|| Some(http::HeaderValue::from_static("attachment")))
}

/// Serialize an error into the wire body `{"error": {"kind", "message"}}`.
#[must_use]
pub fn error_to_json(kind: &str, message: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "error": { "kind": kind, "message": message }
    }))
    .expect("JSON serialization of error cannot fail")
}

/// Map a depot error to its transport status and render it.
#[must_use]
pub fn depot_error_response(error: &DepotError) -> http::Response<DepotResponseBody> {
    error_response(status_for(error), error.kind(), &error.to_string())
}

/// Render a routing failure as 404 or 405.
#[must_use]
pub fn route_error_response(error: &RouteError) -> http::Response<DepotResponseBody> {
    let (status, kind) = match error {
        RouteError::NoRoute { .. } => (http::StatusCode::NOT_FOUND, "NoRoute"),
        RouteError::MethodNotAllowed { .. } => {
            (http::StatusCode::METHOD_NOT_ALLOWED, "MethodNotAllowed")
        }
    };
    error_response(status, kind, &error.to_string())
}

/// Render an upload body parse failure as 400.
#[must_use]
pub fn body_error_response(error: &BodyError) -> http::Response<DepotResponseBody> {
    error_response(
        http::StatusCode::BAD_REQUEST,
        "MalformedBody",
        &error.to_string(),
    )
}

/// Render a failed authorization check as 401.
#[must_use]
pub fn unauthorized_response() -> http::Response<DepotResponseBody> {
    error_response(
        http::StatusCode::UNAUTHORIZED,
        "Unauthorized",
        "missing or invalid API key",
    )
}

fn error_response(
    status: http::StatusCode,
    kind: &str,
    message: &str,
) -> http::Response<DepotResponseBody> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(DepotResponseBody::from_json(error_to_json(kind, message)))
        .expect("valid error response")
}

fn status_for(error: &DepotError) -> http::StatusCode {
    match error {
        DepotError::NotFound { .. } => http::StatusCode::NOT_FOUND,
        DepotError::InvalidFolder { .. } | DepotError::MalformedKey { .. } => {
            http::StatusCode::BAD_REQUEST
        }
        DepotError::Inconsistent { .. } | DepotError::Backend { .. } | DepotError::Internal(_) => {
            http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn serialize<T: serde::Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("JSON serialization of wire types cannot fail")
}
