//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `StoreClient<T>` whose requests are answered
//! from a queue of expectations instead of a `StoreActor`. It lets you test code that
//! *uses* a client (form submit callbacks, front-end commands) deterministically, and
//! inject failures a real store would rarely produce.
//!
//! ## When to use Mocks vs the Real Store
//!
//! | Feature | MockClient | Real StoreActor |
//! |---------|------------|------------|
//! | **State** | None (expectations) | Real collection + durable slot |
//! | **Use Case** | Logic *around* the client | The store itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Needs specific data |
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use roster_framework::mock::MockClient;
//! use roster_framework::{StoreEntity, StoreError};
//!
//! #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
//! struct Tag { id: String }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct TagError;
//!
//! impl StoreEntity for Tag {
//!     type Id = String; type Draft = (); type Error = TagError;
//!     fn id(&self) -> &String { &self.id }
//!     fn from_draft(id: String, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
//!     fn replacement(id: String, _: (), _: Option<&Self>) -> Result<Self, TagError> { Ok(Self { id }) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     let client = mock.client();
//!
//!     // Simulate a store that went away
//!     mock.expect_create().return_err(StoreError::ActorClosed);
//!
//!     let result = client.create(()).await;
//!     assert!(matches!(result, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver, or use the fluent [`MockClient`] API.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: StoreEntity> {
    List {
        response: Result<Arc<[T]>, StoreError>,
    },
    Get {
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Update {
        response: Result<T, StoreError>,
    },
    Delete {
        response: Result<(), StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order; a request that does not match
/// the next expectation panics the mock task, which surfaces as `StoreError::ActorDropped`
/// in the caller.
pub struct MockClient<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Expectations<T>,
    _revisions: watch::Sender<Arc<[T]>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let (revisions, subscription) = watch::channel::<Arc<[T]>>(Vec::new().into());
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, subscription),
            expectations,
            _revisions: revisions,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Arc<[T]>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Get { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Update { response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(|response| Expectation::Delete { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder that queues the response for one expected request.
pub struct ExpectationBuilder<T: StoreEntity, R> {
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    expectations: Expectations<T>,
}

impl<T: StoreEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// The test owns the receiver: it can inspect each request as it arrives and answer it
/// through the `respond_to` channel, including delaying the answer to observe what the
/// caller does while it waits.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, subscription) = watch::channel::<Arc<[T]>>(Vec::new().into());
    (StoreClient::new(sender, subscription), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Draft, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Draft, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            draft,
            respond_to,
        }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Tag {
        id: String,
        label: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Tag error")]
    struct TagError;

    impl StoreEntity for Tag {
        type Id = String;
        type Draft = String;
        type Error = TagError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_draft(id: String, label: String) -> Result<Self, TagError> {
            Ok(Self { id, label })
        }

        fn replacement(id: String, label: String, _: Option<&Self>) -> Result<Self, TagError> {
            Ok(Self { id, label })
        }
    }

    fn tag(id: &str, label: &str) -> Tag {
        Tag {
            id: id.into(),
            label: label.into(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let create_task = tokio::spawn(async move { client.create("urgent".to_string()).await });

        let (draft, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(draft, "urgent");
        responder.send(Ok(tag("t1", "urgent"))).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(t) if t.id == "t1"));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();

        mock.expect_create().return_ok(tag("t1", "urgent"));
        mock.expect_list().return_ok(vec![tag("t1", "urgent")].into());
        mock.expect_delete().return_err(StoreError::ActorClosed);

        let client = mock.client();

        let created = client.create("urgent".to_string()).await.unwrap();
        assert_eq!(created.id, "t1");

        let listed = client.list().await.unwrap();
        assert_eq!(listed.len(), 1);

        let deleted = client.delete("t1".to_string()).await;
        assert!(matches!(deleted, Err(StoreError::ActorClosed)));

        mock.verify();
    }
}
