//! Depot request routing.
//!
//! The wire surface is a small fixed tree, so routing is a match over the
//! HTTP method and the percent-decoded path segments:
//!
//! ```text
//! GET    /               -> ListFolders
//! GET    /{folder}       -> ListObjects
//! POST   /{folder}       -> CreateObject
//! GET    /{folder}/{id}  -> ReadObject
//! PUT    /{folder}/{id}  -> UpdateObject
//! DELETE /{folder}/{id}  -> DeleteObject
//! ```
//!
//! A trailing slash is tolerated. Deeper paths are not routable; folder names
//! that happen to contain `/` must be percent-encoded by the client.

use http::Method;
use percent_encoding::percent_decode_str;

use depot_model::DepotOperation;

/// Why a request could not be mapped to an operation.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The path shape matches no route.
    #[error("no route for path: {path}")]
    NoRoute {
        /// The request path as received.
        path: String,
    },

    /// The path shape is known but the method is not supported on it.
    #[error("method {method} not allowed for path: {path}")]
    MethodNotAllowed {
        /// The request method.
        method: Method,
        /// The request path as received.
        path: String,
    },
}

/// Resolve an HTTP request line to a Depot operation.
///
/// # Errors
///
/// Returns [`RouteError::NoRoute`] for paths deeper than two segments and
/// [`RouteError::MethodNotAllowed`] for a known path shape with an
/// unsupported method.
pub fn resolve_operation(method: &Method, uri: &http::Uri) -> Result<DepotOperation, RouteError> {
    let path = uri.path();
    let segments = path_segments(path);

    match (method, segments.as_slice()) {
        (&Method::GET, []) => Ok(DepotOperation::ListFolders),

        (&Method::GET, [folder]) => Ok(DepotOperation::ListObjects {
            folder: folder.clone(),
        }),
        (&Method::POST, [folder]) => Ok(DepotOperation::CreateObject {
            folder: folder.clone(),
        }),

        (&Method::GET, [folder, id]) => Ok(DepotOperation::ReadObject {
            folder: folder.clone(),
            id: id.clone(),
        }),
        (&Method::PUT, [folder, id]) => Ok(DepotOperation::UpdateObject {
            folder: folder.clone(),
            id: id.clone(),
        }),
        (&Method::DELETE, [folder, id]) => Ok(DepotOperation::DeleteObject {
            folder: folder.clone(),
            id: id.clone(),
        }),

        (_, [] | [_] | [_, _]) => Err(RouteError::MethodNotAllowed {
            method: method.clone(),
            path: path.to_owned(),
        }),
        _ => Err(RouteError::NoRoute {
            path: path.to_owned(),
        }),
    }
}

/// Split a path into percent-decoded segments, tolerating a trailing slash.
///
/// Empty interior segments are dropped, so `//docs//` routes the same as
/// `/docs`.
fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode_segment)
        .collect()
}

/// Decode a percent-encoded path segment.
fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
