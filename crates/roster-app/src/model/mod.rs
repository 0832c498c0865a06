//! Pure data structures (DTOs); [`UserRecord`] implements the
//! [`StoreEntity`](roster_framework::StoreEntity) trait.

pub mod user;

pub use user::*;
