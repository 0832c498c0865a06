//! # System Lifecycle
//!
//! Starts the user store, wires its client to consumers, and shuts it down.
//!
//! ## Dependency Injection
//!
//! The store is built once in [`RosterSystem::new`]. Every consumer (the CLI, a
//! [`UserForm`](crate::forms::UserForm) submit callback, a test) receives a `UserClient`
//! clone explicitly; there is no ambient access to the collection.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the store's channel
//! 2. **Store detects closure** - `receiver.recv()` returns `None` and the loop ends
//! 3. **Await completion** - [`RosterSystem::shutdown`] joins the store task
//!
//! Every mutation was already persisted when it was acknowledged, so nothing is flushed
//! on the way out.
//!
//! ## Observability
//!
//! The binary calls [`roster_framework::tracing::setup_tracing`] once before building
//! the system:
//!
//! ```bash
//! RUST_LOG=info roster list     # Compact logs
//! RUST_LOG=debug roster list    # Request payloads
//! ```

pub mod system;

pub use system::*;
