//! The main depot HTTP service implementing hyper's `Service` trait.
//!
//! [`DepotHttpService`] ties routing, authorization, body parsing, dispatch,
//! and response rendering into a single hyper-compatible service:
//!
//! 1. Request body collection
//! 2. Routing via [`crate::router`]
//! 3. API key authorization for mutating operations
//! 4. Upload body parsing for create and update
//! 5. Dispatch to the [`DepotHandler`]
//! 6. Common response headers (`x-request-id`, `Server`)

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use depot_model::DepotError;

use crate::auth;
use crate::body::DepotResponseBody;
use crate::dispatch::{DepotHandler, dispatch_operation};
use crate::request;
use crate::response;
use crate::router;

/// The depot HTTP service.
///
/// # Type Parameters
///
/// - `H`: The business logic handler implementing [`DepotHandler`].
#[derive(Debug)]
pub struct DepotHttpService<H: DepotHandler> {
    handler: Arc<H>,
    api_key: Arc<Option<String>>,
}

impl<H: DepotHandler> DepotHttpService<H> {
    /// Create a service over the given handler.
    ///
    /// With `api_key = None` every mutation is allowed; the server binary
    /// warns about that mode at startup.
    #[must_use]
    pub fn new(handler: H, api_key: Option<String>) -> Self {
        Self {
            handler: Arc::new(handler),
            api_key: Arc::new(api_key),
        }
    }

    /// Create a service from an already shared handler.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, api_key: Option<String>) -> Self {
        Self {
            handler,
            api_key: Arc::new(api_key),
        }
    }
}

impl<H: DepotHandler> Clone for DepotHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            api_key: Arc::clone(&self.api_key),
        }
    }
}

impl<H: DepotHandler> Service<http::Request<Incoming>> for DepotHttpService<H> {
    type Response = http::Response<DepotResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let api_key = Arc::clone(&self.api_key);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();

            let response = match collect_request(req).await {
                Ok((parts, body)) => {
                    process_request(
                        parts,
                        body,
                        handler.as_ref(),
                        api_key.as_deref(),
                        &request_id,
                    )
                    .await
                }
                Err(err) => {
                    error!(error = %err, request_id, "failed to collect request body");
                    response::depot_error_response(&DepotError::backend(
                        "collecting request body",
                        err,
                    ))
                }
            };

            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Collect the full body from a hyper `Incoming` stream into `Bytes`.
async fn collect_request(
    req: http::Request<Incoming>,
) -> Result<(http::request::Parts, Bytes), hyper::Error> {
    let (parts, incoming) = req.into_parts();
    let body = incoming.collect().await?.to_bytes();
    Ok((parts, body))
}

/// Process a collected request through the depot pipeline.
async fn process_request<H: DepotHandler>(
    parts: http::request::Parts,
    body: Bytes,
    handler: &H,
    api_key: Option<&str>,
    request_id: &str,
) -> http::Response<DepotResponseBody> {
    debug!(method = %parts.method, uri = %parts.uri, request_id, "processing request");

    // 1. Route.
    let operation = match router::resolve_operation(&parts.method, &parts.uri) {
        Ok(operation) => operation,
        Err(err) => {
            warn!(
                method = %parts.method, uri = %parts.uri, error = %err, request_id,
                "failed to route request"
            );
            return response::route_error_response(&err);
        }
    };

    info!(operation = %operation, request_id, "routed request");

    // 2. Authorize mutations. Reads and listings are open.
    if operation.is_mutation() {
        let presented = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if !auth::is_authorized(api_key, presented) {
            warn!(operation = %operation, request_id, "rejected unauthorized mutation");
            return response::unauthorized_response();
        }
    }

    // 3. Parse the upload payload where the operation expects one.
    let payload = if operation.expects_payload() {
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        match request::parse_payload(content_type, &body) {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!(error = %err, request_id, "failed to parse upload body");
                return response::body_error_response(&err);
            }
        }
    } else {
        None
    };

    // 4. Dispatch and render.
    match dispatch_operation(handler, operation, payload).await {
        Ok(output) => response::render_output(output),
        Err(err) => {
            debug!(error = %err, request_id, "operation returned error");
            response::depot_error_response(&err)
        }
    }
}

/// Add common response headers to every depot response.
fn add_common_headers(
    mut response: http::Response<DepotResponseBody>,
    request_id: &str,
) -> http::Response<DepotResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }
    headers.insert("Server", http::header::HeaderValue::from_static("depot"));

    response
}
