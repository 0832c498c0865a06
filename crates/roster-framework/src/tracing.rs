//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`); log levels come from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: snapshot load (or seed fallback), startup and shutdown with the
//!   collection size
//! - **Record Operations**: List, Get, Create, Update, Delete with `entity_type` and `id`
//! - **Persistence**: slot writes at `debug`, write failures at `error`
//! - **Forms**: blur validation and submit gating at `debug`, submit callback failures at
//!   `error`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info roster list
//!
//! # Show full payloads and form activity
//! RUST_LOG=debug roster add --name Ana --email ana@x.com --phone +351911222333 --type Architect
//!
//! # Filter to the framework only
//! RUST_LOG=roster_framework=debug roster list
//! ```
//!
//! With `RUST_LOG=info` a create looks like:
//!
//! ```text
//! INFO No snapshot; using seed entity_type="UserRecord" slot="users"
//! INFO Store started entity_type="UserRecord" size=2
//! INFO create_user: Created entity_type="UserRecord" id=lzx4k2a1q8m3c9d0r size=3
//! ```

/// Installs the global `tracing` subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
