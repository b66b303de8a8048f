//! Model types for the depot object store.
//!
//! This crate holds everything shared between the storage core and the HTTP
//! adapter: the per-object metadata record, the upload payload and listing
//! summary shapes, the operation enum produced by the router, and the typed
//! error surface that every fallible depot operation returns.

pub mod error;
pub mod operations;
pub mod types;

pub use error::{DepotError, DepotResult, StoreSide};
pub use operations::DepotOperation;
pub use types::{ObjectMeta, ObjectPayload, ObjectSummary, default_content_type};
