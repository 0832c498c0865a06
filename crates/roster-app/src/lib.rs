//! # Roster App Library
//!
//! The user directory built on `roster_framework`. The modules are exposed for the `roster`
//! binary and for integration testing.
//!
//! - [`model`]: [`UserRecord`](model::UserRecord), [`UserData`](model::UserData) and the
//!   [`UserType`](model::UserType) catalog
//! - [`user_store`]: record-level validation and the store factory
//! - [`clients`]: [`UserClient`](clients::UserClient), the typed handle to the store
//! - [`forms`]: [`UserForm`](forms::UserForm) sessions in create or edit mode
//! - [`config`]: [`RosterConfig`](config::RosterConfig)
//! - [`lifecycle`]: [`RosterSystem`](lifecycle::RosterSystem) startup and shutdown

pub mod clients;
pub mod config;
pub mod forms;
pub mod lifecycle;
pub mod model;
pub mod user_store;
