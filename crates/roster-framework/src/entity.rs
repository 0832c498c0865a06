//! # StoreEntity Trait
//!
//! The `StoreEntity` trait defines the contract a record type must implement to be
//! managed by the generic [`StoreActor`](crate::StoreActor). It names the ID type, the
//! payload used for both create and update, and the entity's error type, and it owns the
//! record-level validation gate: the actor never builds a record without going through
//! [`StoreEntity::from_draft`] or [`StoreEntity::replacement`].
//!
//! # Wholesale Replacement
//! There is no field-by-field update hook. An update produces a brand new record from the
//! payload and the actor swaps it in for the old one. The previous record is handed to
//! [`StoreEntity::replacement`] only so immutable fields (creation timestamps) survive.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any record type must implement to be managed by `StoreActor`.
///
/// Records are serialized as a flat JSON array into the durable slot, hence the
/// `Serialize + DeserializeOwned` bounds.
pub trait StoreEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// The data required to create or replace a record (DTO - Data Transfer Object).
    type Draft: Send + Sync + Debug;

    /// The error type for this entity.
    ///
    /// Validation failures are reported through this type; the client side can recover
    /// it from [`StoreError::Entity`](crate::StoreError::Entity) by downcasting.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the record's identifier.
    fn id(&self) -> &Self::Id;

    /// Builds a new record from a freshly generated ID and a validated payload.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Result<Self, Self::Error>;

    /// Builds the record that replaces `previous` (if any) under the same `id`.
    fn replacement(
        id: Self::Id,
        draft: Self::Draft,
        previous: Option<&Self>,
    ) -> Result<Self, Self::Error>;

    /// Example records used when the durable slot is empty or unreadable.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}
