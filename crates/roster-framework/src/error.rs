//! # Framework Errors
//!
//! This module defines the common error types used throughout the framework.
//! Store plumbing failures ([`StoreError`]) and durable slot failures
//! ([`StorageError`]) are kept apart: the first travels back to callers of a
//! [`StoreClient`](crate::StoreClient), the second is handled (logged) inside
//! the store actor and never reaches them.

/// Errors that can occur when talking to a [`StoreActor`](crate::StoreActor).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by a [`SlotStorage`](crate::storage::SlotStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
