//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `StoreClient` and `StoreActor`.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the store's operations: `List` and `Get` read the current
/// revision, while `Create`, `Update` and `Delete` each produce a new revision that is
/// persisted before the response is sent.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    List {
        respond_to: Response<Arc<[T]>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
