//! # Generic Client
//!
//! This module defines the generic client for communicating with the store actor.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// ## StoreClient
///
/// The `StoreClient<T>` provides a type-safe, async API for interacting with a `StoreActor<T>`.
/// It forwards requests over a Tokio mpsc channel and returns results via oneshot channels.
///
/// * **Cloneable** – holds only a sender and a watch receiver, so cloning is inexpensive.
/// * **Async API** – all methods return `Future`s that resolve to `Result<…, StoreError>`.
/// * **Generic** – works with any record that implements `StoreEntity`.
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
    revisions: watch::Receiver<Arc<[T]>>,
}

// Derived Clone would demand `T: Clone` on the wrapper for no reason.
impl<T: StoreEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            revisions: self.revisions.clone(),
        }
    }
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(
        sender: mpsc::Sender<StoreRequest<T>>,
        revisions: watch::Receiver<Arc<[T]>>,
    ) -> Self {
        Self { sender, revisions }
    }

    pub async fn list(&self) -> Result<Arc<[T]>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { draft, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, draft: T::Draft) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update {
                id,
                draft,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Returns a receiver that observes every new revision of the collection.
    ///
    /// The current revision is marked as seen; `changed().await` resolves on the next
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<Arc<[T]>> {
        let mut receiver = self.revisions.clone();
        drop(receiver.borrow_and_update());
        receiver
    }
}
