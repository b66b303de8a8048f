//! Operation handler bridging the HTTP layer to the object service.
//!
//! Implements the [`DepotHandler`] trait by delegating each operation to the
//! corresponding [`ObjectService`] method. The HTTP crate owns parsing and
//! rendering; the service owns all storage semantics, so every method here is
//! a one-line delegation.

use async_trait::async_trait;
use bytes::Bytes;

use depot_core::ObjectService;
use depot_http::DepotHandler;
use depot_model::{DepotResult, ObjectMeta, ObjectPayload, ObjectSummary};

/// Wrapper implementing [`DepotHandler`] over an [`ObjectService`].
#[derive(Debug, Clone)]
pub struct ServiceHandler(pub ObjectService);

#[async_trait]
impl DepotHandler for ServiceHandler {
    async fn list_folders(&self) -> DepotResult<Vec<String>> {
        self.0.list_folders().await
    }

    async fn list_objects(&self, folder: &str) -> DepotResult<Vec<ObjectSummary>> {
        self.0.list_objects(folder).await
    }

    async fn create_object(&self, folder: &str, payload: ObjectPayload) -> DepotResult<String> {
        self.0.create_object(folder, payload).await
    }

    async fn read_object(&self, folder: &str, id: &str) -> DepotResult<(ObjectMeta, Bytes)> {
        self.0.read_object(folder, id).await
    }

    async fn update_object(
        &self,
        folder: &str,
        id: &str,
        payload: ObjectPayload,
    ) -> DepotResult<ObjectMeta> {
        self.0.update_object(folder, id, payload).await
    }

    async fn delete_object(&self, folder: &str, id: &str) -> DepotResult<()> {
        self.0.delete_object(folder, id).await
    }
}
