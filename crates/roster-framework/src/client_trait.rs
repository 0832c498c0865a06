//! # RecordClient Trait
//!
//! Provides a common interface for domain-specific clients, adding default `list`, `get`
//! and `delete` methods built on top of a generic `StoreClient`. Create and update carry
//! domain payloads and stay on the concrete client.
use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for domain-specific clients to inherit the read and delete operations.
///
/// # Example
///
/// ```rust
/// use roster_framework::{RecordClient, StoreClient, StoreEntity, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// struct Tag { id: String }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
///
/// impl StoreEntity for Tag {
///     type Id = String; type Draft = (); type Error = TagError;
///     fn id(&self) -> &String { &self.id }
///     fn from_draft(id: String, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn replacement(id: String, _: (), _: Option<&Self>) -> Result<Self, TagError> { Ok(Self { id }) }
/// }
///
/// struct TagClient { inner: StoreClient<Tag> }
///
/// #[async_trait]
/// impl RecordClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &StoreClient<Tag> { &self.inner }
///     fn map_error(e: StoreError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // list(), get() and delete() are provided automatically!
///     let _ = client.list().await;
///     let _ = client.delete("t1".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait RecordClient<T: StoreEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch the current revision of the collection.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Arc<[T]>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a record by ID. Deleting an unknown ID succeeds.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
