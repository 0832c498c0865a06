//! # User Store
//!
//! The authoritative collection of [`UserRecord`]s, owned by a
//! [`StoreActor`](roster_framework::StoreActor) and mirrored to a durable slot.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](roster_framework::StoreEntity) implementation for
//!   [`UserRecord`], including the two-record seed
//! - [`validation`] - record-level validation ([`validate_user`])
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use roster_app::config::RosterConfig;
//! use roster_app::model::{UserData, UserType};
//! use roster_app::user_store;
//! use roster_framework::storage::MemoryStorage;
//! use roster_framework::RecordClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_store::new(&RosterConfig::default(), MemoryStorage::new());
//!     tokio::spawn(actor.run());
//!
//!     let data = UserData::new("Ana", "ana@x.com", "+351911222333", [UserType::Architect]);
//!     let ana = client.create_user(data).await?;
//!     assert_eq!(client.list().await?.len(), 3);
//!     assert_eq!(client.get(ana.id).await?.map(|u| u.name), Some("Ana".to_string()));
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::{validate_user, ValidationReport};

use crate::clients::UserClient;
use crate::config::RosterConfig;
use crate::model::UserRecord;
use roster_framework::storage::SlotStorage;
use roster_framework::StoreActor;

/// Creates a new user store actor and its client.
pub fn new(
    config: &RosterConfig,
    storage: impl SlotStorage,
) -> (StoreActor<UserRecord>, UserClient) {
    let (actor, generic_client) =
        StoreActor::new(config.channel_capacity, storage, config.slot_key.clone());
    (actor, UserClient::new(generic_client))
}
