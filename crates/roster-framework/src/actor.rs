//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the component that owns a collection of records
//! and the durable slot it is mirrored to. It implements the "Server" side of the Actor
//! Model: requests are processed sequentially, so the collection needs no lock.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::reducer::{reduce, Mutation};
use crate::storage::SlotStorage;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// The generic actor that manages a collection of records.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the current revision of the
/// collection, the storage backend and the receiver end of the channel.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so two mutations can never
/// interleave. Run it on a `current_thread` runtime and the whole store stays on the UI
/// thread; nothing in here blocks on anything but storage I/O.
///
/// # Revisions
/// The collection is an `Arc<[T]>`. Each mutation goes through [`reduce`], yielding a new
/// revision that is stored, broadcast to subscribers, then persisted.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
///     The durable slot is read here, before any request can arrive.
/// 2.  **Run**: Spawn `actor.run()` on the runtime.
/// 3.  **Use**: Clone the client into whichever consumer needs it.
///
/// ```rust
/// use roster_framework::storage::MemoryStorage;
/// use roster_framework::{StoreActor, StoreEntity};
///
/// #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// struct Tag { id: String, label: String }
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// impl StoreEntity for Tag {
///     type Id = String; type Draft = String; type Error = TagError;
///     fn id(&self) -> &String { &self.id }
///     fn from_draft(id: String, label: String) -> Result<Self, TagError> { Ok(Self { id, label }) }
///     fn replacement(id: String, label: String, _: Option<&Self>) -> Result<Self, TagError> {
///         Ok(Self { id, label })
///     }
/// }
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let (actor, client) = StoreActor::<Tag>::new(10, MemoryStorage::new(), "tags");
///     tokio::spawn(actor.run());
///
///     let tag = client.create("urgent".to_string()).await.unwrap();
///     assert_eq!(client.list().await.unwrap().len(), 1);
///     client.delete(tag.id).await.unwrap();
/// }
/// ```
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: Arc<[T]>,
    storage: Box<dyn SlotStorage>,
    slot_key: String,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    revisions: watch::Sender<Arc<[T]>>,
}

impl<T: StoreEntity> StoreActor<T>
where
    T::Id: From<String>,
{
    /// Creates a store using [`crate::id::generate`] for new IDs.
    pub fn new(
        buffer_size: usize,
        storage: impl SlotStorage,
        slot_key: impl Into<String>,
    ) -> (Self, StoreClient<T>) {
        Self::with_id_generator(buffer_size, storage, slot_key, || {
            T::Id::from(crate::id::generate())
        })
    }
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space. Zero is raised to one.
    /// * `storage` - The durable key-value area holding the slot.
    /// * `slot_key` - The key the collection is read from and written to.
    /// * `next_id_fn` - Produces candidate IDs for new records.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// 1. The `StoreActor` instance (the server), which must be run via `.run()`.
    /// 2. The `StoreClient` instance, which can be cloned and shared to send requests.
    pub fn with_id_generator(
        buffer_size: usize,
        storage: impl SlotStorage,
        slot_key: impl Into<String>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, StoreClient<T>) {
        let slot_key = slot_key.into();
        let records = load_snapshot::<T>(&storage, &slot_key);
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (revisions, subscription) = watch::channel(records.clone());

        let actor = Self {
            receiver,
            records,
            storage: Box::new(storage),
            slot_key,
            next_id_fn: Box::new(next_id_fn),
            revisions,
        };
        let client = StoreClient::new(sender, subscription);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        let entity_type = entity_type::<T>();
        info!(entity_type, size = self.records.len(), "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { respond_to } => {
                    debug!(entity_type, size = self.records.len(), "List");
                    let _ = respond_to.send(Ok(self.records.clone()));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.records.iter().find(|r| *r.id() == id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Create { draft, respond_to } => {
                    debug!(entity_type, ?draft, "Create");
                    let id = self.fresh_id();
                    match T::from_draft(id.clone(), draft) {
                        Ok(item) => {
                            self.commit(Mutation::Insert(item.clone()));
                            info!(entity_type, %id, size = self.records.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Update {
                    id,
                    draft,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?draft, "Update");
                    let previous = self.records.iter().find(|r| *r.id() == id);
                    let matched = previous.is_some();
                    match T::replacement(id.clone(), draft, previous) {
                        Ok(item) => {
                            if !matched {
                                warn!(entity_type, %id, "No record matched; collection unchanged");
                            }
                            self.commit(Mutation::Replace(item.clone()));
                            info!(entity_type, %id, matched, "Updated");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update rejected");
                            let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    self.commit(Mutation::Remove(id.clone()));
                    info!(entity_type, %id, size = self.records.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn fresh_id(&self) -> T::Id {
        loop {
            let candidate = (self.next_id_fn)();
            if !self.records.iter().any(|r| *r.id() == candidate) {
                return candidate;
            }
            warn!(id = %candidate, "Generated ID already in use; retrying");
        }
    }

    /// Installs the next revision, notifies subscribers and writes the slot.
    fn commit(&mut self, mutation: Mutation<T>) {
        self.records = reduce(&self.records, mutation);
        self.revisions.send_replace(self.records.clone());
        self.persist();
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&*self.records) {
            Ok(payload) => payload,
            Err(e) => {
                error!(slot = %self.slot_key, error = %e, "Failed to serialize collection");
                return;
            }
        };
        if let Err(e) = self.storage.write(&self.slot_key, &payload) {
            error!(slot = %self.slot_key, error = %e, "Failed to persist collection");
        }
    }
}

/// Reads the slot, falling back to [`StoreEntity::seed`] when it is missing or unusable.
fn load_snapshot<T: StoreEntity>(storage: &dyn SlotStorage, key: &str) -> Arc<[T]> {
    let entity_type = entity_type::<T>();
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                info!(entity_type, slot = key, size = records.len(), "Loaded snapshot");
                records.into()
            }
            Err(e) => {
                warn!(entity_type, slot = key, error = %e, "Snapshot unreadable; using seed");
                T::seed().into()
            }
        },
        Ok(None) => {
            info!(entity_type, slot = key, "No snapshot; using seed");
            T::seed().into()
        }
        Err(e) => {
            warn!(entity_type, slot = key, error = %e, "Storage read failed; using seed");
            T::seed().into()
        }
    }
}

/// Extracts just the type name (e.g. "UserRecord" instead of "roster_app::model::user::UserRecord").
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
