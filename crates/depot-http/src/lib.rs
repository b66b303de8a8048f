//! Depot HTTP routing, body parsing, response rendering, and hyper service.
//!
//! This crate is the transport layer over the depot object store. It handles:
//!
//! - **Routing** ([`router`]): Maps method + path to a depot operation over
//!   the small fixed route tree (`/`, `/{folder}`, `/{folder}/{id}`).
//!
//! - **Upload parsing** ([`request`], [`multipart`]): Converts JSON envelope
//!   or multipart bodies into an `ObjectPayload`.
//!
//! - **Authorization** ([`auth`]): Constant-time API key check on mutating
//!   operations.
//!
//! - **Dispatch** ([`dispatch`]): Routes identified operations to the
//!   business logic via the [`DepotHandler`](dispatch::DepotHandler) trait.
//!
//! - **Rendering** ([`response`]): Success JSON, raw content reads with
//!   download headers, and structured error bodies.
//!
//! - **Service** ([`service`]): The [`DepotHttpService`](service::DepotHttpService)
//!   implementing hyper's `Service` trait, tying the pipeline together.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> DepotHttpService (hyper Service)
//!     -> Body collection
//!     -> Router (method + path segments)
//!     -> API key check (mutations only)
//!     -> Upload parsing (create/update)
//!     -> dispatch_operation (DepotHandler trait)
//!     -> Common response headers (x-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use depot_http::dispatch::NotImplementedHandler;
//! use depot_http::service::DepotHttpService;
//!
//! let service = DepotHttpService::new(NotImplementedHandler, None);
//! // Use `service` with a hyper server.
//! ```

pub mod auth;
pub mod body;
pub mod dispatch;
pub mod multipart;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

// Re-export key types for convenience.
pub use body::DepotResponseBody;
pub use dispatch::{DepotHandler, NotImplementedHandler, OperationOutput};
pub use router::RouteError;
pub use service::DepotHttpService;
