//! # User Client
//!
//! Provides a high-level API for interacting with the user store.
//! It wraps a `StoreClient<UserRecord>` and exposes domain-specific methods.
use crate::model::{UserData, UserId, UserRecord};
use crate::user_store::UserError;
use async_trait::async_trait;
use roster_framework::{RecordClient, StoreClient, StoreError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for interacting with the user store.
#[derive(Clone)]
pub struct UserClient {
    inner: StoreClient<UserRecord>,
}

impl UserClient {
    pub fn new(inner: StoreClient<UserRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<UserRecord> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<UserRecord> {
        &self.inner
    }

    /// Recovers the [`UserError`] the entity raised inside the actor, so validation
    /// field maps reach the caller intact.
    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::Entity(source) => match source.downcast::<UserError>() {
                Ok(user_error) => *user_error,
                Err(other) => UserError::Store(other.to_string()),
            },
            other => UserError::Store(other.to_string()),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, data: UserData) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        self.inner.create(data).await.map_err(Self::map_error)
    }

    /// Replaces the user with `id` wholesale. An unknown `id` leaves the collection as it
    /// was and still returns the record that was built.
    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, data: UserData) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        self.inner.update(id, data).await.map_err(Self::map_error)
    }

    /// Observes each new revision of the collection.
    pub fn subscribe(&self) -> watch::Receiver<Arc<[UserRecord]>> {
        self.inner.subscribe()
    }
}
