//! # Collection Reducer
//!
//! Pure state transitions for the store's collection. Every mutation takes the current
//! revision by reference and returns a new one; the old `Arc<[T]>` is never touched, so
//! anyone still holding it keeps a consistent snapshot and can detect change with
//! [`Arc::ptr_eq`].

use crate::entity::StoreEntity;
use std::sync::Arc;

/// A change to apply to the collection.
#[derive(Debug, Clone)]
pub enum Mutation<T: StoreEntity> {
    /// Append a new record at the end.
    Insert(T),
    /// Swap the record sharing this record's ID. Non-matching records are kept as-is.
    Replace(T),
    /// Drop the record with this ID, if present.
    Remove(T::Id),
}

/// Applies `mutation` to `current`, producing the next revision.
pub fn reduce<T: StoreEntity>(current: &[T], mutation: Mutation<T>) -> Arc<[T]> {
    match mutation {
        Mutation::Insert(record) => current
            .iter()
            .cloned()
            .chain(std::iter::once(record))
            .collect(),
        Mutation::Replace(record) => current
            .iter()
            .map(|existing| {
                if existing.id() == record.id() {
                    record.clone()
                } else {
                    existing.clone()
                }
            })
            .collect(),
        Mutation::Remove(id) => current
            .iter()
            .filter(|existing| *existing.id() != id)
            .cloned()
            .collect(),
    }
}
