//! # Roster Framework
//!
//! Generic building blocks for small record-keeping applications: a form engine with
//! declarative validation, and a record store that owns its collection in an actor and
//! mirrors every revision to a durable key-value slot.
//!
//! Nothing in this crate knows what a "user" is. The application crate supplies the record
//! type (via [`StoreEntity`]) and the form model (via [`form::FormModel`]).
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - record shape, ID type, and the record-level
//!    validation gate
//! 2. **Runtime Layer** ([`StoreActor`]) - sequential request processing, revisions,
//!    persistence
//! 3. **Interface Layer** ([`StoreClient`], [`RecordClient`]) - type-safe, cloneable access
//! 4. **Form Layer** ([`form`]) - per-session values, errors, touched state, submit gating
//!
//! ## Store Semantics
//!
//! - The collection is an immutable `Arc<[T]>` per revision; each mutation goes through
//!   the pure [`reducer::reduce`] and yields a new revision.
//! - Update replaces a record wholesale. Delete of an unknown ID is a no-op.
//! - Every mutation is persisted to the slot; a failed write is logged, not returned.
//! - At startup a missing or unreadable slot falls back to [`StoreEntity::seed`].
//!
//! ```rust
//! use roster_framework::storage::MemoryStorage;
//! use roster_framework::{StoreActor, StoreEntity};
//!
//! #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
//! struct Note { id: String, body: String }
//! #[derive(Debug, thiserror::Error)] #[error("empty note")] struct NoteError;
//!
//! impl StoreEntity for Note {
//!     type Id = String;
//!     type Draft = String;
//!     type Error = NoteError;
//!
//!     fn id(&self) -> &String { &self.id }
//!
//!     fn from_draft(id: String, body: String) -> Result<Self, NoteError> {
//!         if body.trim().is_empty() { return Err(NoteError); }
//!         Ok(Self { id, body })
//!     }
//!
//!     fn replacement(id: String, body: String, _: Option<&Self>) -> Result<Self, NoteError> {
//!         Self::from_draft(id, body)
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let storage = MemoryStorage::new();
//!     let (actor, client) = StoreActor::<Note>::new(10, storage.clone(), "notes");
//!     tokio::spawn(actor.run());
//!
//!     assert!(client.create("   ".to_string()).await.is_err());
//!     let note = client.create("buy milk".to_string()).await.unwrap();
//!     assert_eq!(client.get(note.id).await.unwrap().unwrap().body, "buy milk");
//!     assert!(storage.raw("notes").unwrap().contains("buy milk"));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The store actor processes one request at a time; run it on a `current_thread` runtime
//!   to keep everything on a single thread.
//! - Form state sits behind a mutex that is never held across an `.await`; a submit
//!   callback may suspend while other input keeps flowing into the same form.
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that answers requests from a queue of
//! expectations, for testing code around a `StoreClient` without running a store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod form;
pub mod id;
pub mod message;
pub mod mock;
pub mod reducer;
pub mod storage;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use entity::StoreEntity;
pub use error::{StorageError, StoreError};
pub use message::{Response, StoreRequest};
