use crate::clients::UserClient;
use crate::config::RosterConfig;
use crate::user_store;
use roster_framework::storage::SlotStorage;
use tracing::{error, info};

/// Runtime orchestrator for the roster.
///
/// `RosterSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the user store
/// - **Dependency Wiring**: Handing out `UserClient` clones; consumers never reach for
///   a global
///
/// # Example
///
/// ```rust
/// use roster_app::config::RosterConfig;
/// use roster_app::lifecycle::RosterSystem;
/// use roster_framework::storage::MemoryStorage;
/// use roster_framework::RecordClient;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), String> {
///     let system = RosterSystem::new(&RosterConfig::default(), MemoryStorage::new());
///     let users = system.user_client.list().await.map_err(|e| e.to_string())?;
///     assert_eq!(users.len(), 2);
///     system.shutdown().await
/// }
/// ```
pub struct RosterSystem {
    /// Client for interacting with the user store
    pub user_client: UserClient,

    handle: tokio::task::JoinHandle<()>,
}

impl RosterSystem {
    /// Creates the user store over `storage` and starts it on the current runtime.
    pub fn new(config: &RosterConfig, storage: impl SlotStorage) -> Self {
        let (store, user_client) = user_store::new(config, storage);
        let handle = tokio::spawn(store.run());
        info!(slot_key = %config.slot_key, "Roster system started");

        Self {
            user_client,
            handle,
        }
    }

    /// Gracefully shuts the system down.
    ///
    /// Drops the system's client so the store's channel closes once every clone held
    /// elsewhere is gone too, then waits for the store task to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down roster system");
        drop(self.user_client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "User store task failed");
            return Err(format!("User store task failed: {e}"));
        }

        info!("Roster system shut down");
        Ok(())
    }
}
