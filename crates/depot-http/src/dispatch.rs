//! Handler trait and operation dispatch.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use depot_model::{
    DepotError, DepotOperation, DepotResult, ObjectMeta, ObjectPayload, ObjectSummary,
};

/// Trait the business logic provider implements, one async method per
/// operation.
///
/// This is the boundary between the HTTP transport and the object store: the
/// transport parses bodies into [`ObjectPayload`] and renders the returned
/// values, the handler owns all storage semantics.
#[async_trait]
pub trait DepotHandler: Send + Sync + 'static {
    /// List every folder that currently holds at least one object.
    async fn list_folders(&self) -> DepotResult<Vec<String>>;

    /// List the objects in a folder.
    async fn list_objects(&self, folder: &str) -> DepotResult<Vec<ObjectSummary>>;

    /// Store a new object, returning its identifier.
    async fn create_object(&self, folder: &str, payload: ObjectPayload) -> DepotResult<String>;

    /// Fetch an object's metadata and content.
    async fn read_object(&self, folder: &str, id: &str) -> DepotResult<(ObjectMeta, Bytes)>;

    /// Replace an existing object, returning the merged metadata.
    async fn update_object(
        &self,
        folder: &str,
        id: &str,
        payload: ObjectPayload,
    ) -> DepotResult<ObjectMeta>;

    /// Remove an object.
    async fn delete_object(&self, folder: &str, id: &str) -> DepotResult<()>;
}

/// What an operation produced, ready for response rendering.
#[derive(Debug)]
pub enum OperationOutput {
    /// Folder names, from `ListFolders`.
    Folders(Vec<String>),
    /// Object summaries, from `ListObjects`.
    Objects(Vec<ObjectSummary>),
    /// The new object's identifier, from `CreateObject`.
    Created(String),
    /// Metadata and raw content, from `ReadObject`.
    Read {
        /// The object's metadata, with `accessed_at` already refreshed.
        meta: ObjectMeta,
        /// The decompressed content bytes.
        content: Bytes,
    },
    /// The merged object summary, from `UpdateObject`.
    Updated(ObjectSummary),
    /// The deleted object's identifier, from `DeleteObject`.
    Deleted(String),
}

/// Dispatch a routed operation to the handler.
///
/// `payload` must be present for the operations that expect an upload body;
/// the service parses it before dispatching.
///
/// # Errors
///
/// Propagates the handler's error, or a backend error if a payload-expecting
/// operation arrives without one.
pub async fn dispatch_operation(
    handler: &dyn DepotHandler,
    operation: DepotOperation,
    payload: Option<ObjectPayload>,
) -> DepotResult<OperationOutput> {
    debug!(operation = %operation, "dispatching operation");

    match operation {
        DepotOperation::ListFolders => Ok(OperationOutput::Folders(handler.list_folders().await?)),
        DepotOperation::ListObjects { folder } => Ok(OperationOutput::Objects(
            handler.list_objects(&folder).await?,
        )),
        DepotOperation::CreateObject { folder } => {
            let payload = require_payload(payload, "CreateObject")?;
            Ok(OperationOutput::Created(
                handler.create_object(&folder, payload).await?,
            ))
        }
        DepotOperation::ReadObject { folder, id } => {
            let (meta, content) = handler.read_object(&folder, &id).await?;
            Ok(OperationOutput::Read { meta, content })
        }
        DepotOperation::UpdateObject { folder, id } => {
            let payload = require_payload(payload, "UpdateObject")?;
            let meta = handler.update_object(&folder, &id, payload).await?;
            Ok(OperationOutput::Updated(ObjectSummary::from_meta(id, &meta)))
        }
        DepotOperation::DeleteObject { folder, id } => {
            handler.delete_object(&folder, &id).await?;
            Ok(OperationOutput::Deleted(id))
        }
    }
}

fn require_payload(payload: Option<ObjectPayload>, operation: &str) -> DepotResult<ObjectPayload> {
    payload.ok_or_else(|| DepotError::backend("dispatch", format!("{operation} without payload")))
}

/// Handler that rejects every operation, for wiring and transport tests.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

#[async_trait]
impl DepotHandler for NotImplementedHandler {
    async fn list_folders(&self) -> DepotResult<Vec<String>> {
        Err(not_implemented("ListFolders"))
    }

    async fn list_objects(&self, _folder: &str) -> DepotResult<Vec<ObjectSummary>> {
        Err(not_implemented("ListObjects"))
    }

    async fn create_object(&self, _folder: &str, _payload: ObjectPayload) -> DepotResult<String> {
        Err(not_implemented("CreateObject"))
    }

    async fn read_object(&self, _folder: &str, _id: &str) -> DepotResult<(ObjectMeta, Bytes)> {
        Err(not_implemented("ReadObject"))
    }

    async fn update_object(
        &self,
        _folder: &str,
        _id: &str,
        _payload: ObjectPayload,
    ) -> DepotResult<ObjectMeta> {
        Err(not_implemented("UpdateObject"))
    }

    async fn delete_object(&self, _folder: &str, _id: &str) -> DepotResult<()> {
        Err(not_implemented("DeleteObject"))
    }
}

fn not_implemented(operation: &str) -> DepotError {
    DepotError::backend("handler", format!("{operation} is not implemented"))
}
