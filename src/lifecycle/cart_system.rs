use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::cart_actor::{ActorError, CartActor, CartContext};
use crate::catalog::{CatalogError, HttpCatalog};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::notify::Notifier;
use crate::storage::FileStorage;

/// Runtime orchestrator for the cart.
///
/// `CartSystem` is responsible for:
/// - **Wiring**: building the catalog, storage and notifier the actor depends on
/// - **Startup**: spawning the actor, which loads the cart from the durable slot
/// - **Shutdown**: closing the request channel and waiting for the actor to stop
///
/// # Example
///
/// ```ignore
/// let config = CartConfig::from_env()?;
/// let (notifier, mut notifications) = ChannelNotifier::new();
/// let system = CartSystem::from_config(&config, Arc::new(notifier))?;
///
/// system.cart_client.add_product(ProductId(1)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl CartSystem {
    /// Spawns a cart actor with the given dependencies.
    pub fn start(context: CartContext, buffer_size: usize) -> Self {
        let (actor, cart_client) = CartActor::new(buffer_size);
        let handle = tokio::spawn(actor.run(context));

        Self {
            cart_client,
            handle,
        }
    }

    /// Spawns a cart actor backed by the HTTP catalog and a file slot.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(
        config: &CartConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CatalogError> {
        let catalog = HttpCatalog::new(config.api_url.clone())?;
        let storage = FileStorage::new(config.storage_dir.clone());
        let context = CartContext::new(Arc::new(catalog), Arc::new(storage), notifier)
            .with_storage_key(config.storage_key.clone());

        info!(
            api_url = %config.api_url,
            storage_dir = %config.storage_dir.display(),
            "Starting cart"
        );
        Ok(Self::start(context, config.channel_capacity))
    }

    /// Gracefully shuts down the cart.
    ///
    /// Drops this system's client and waits for the actor to drain its
    /// channel. Clones of the client handed out earlier keep the actor alive
    /// until they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(ActorError::TaskFailed)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), ActorError> {
        info!("Shutting down cart...");

        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(ActorError::TaskFailed(e.to_string()));
        }

        info!("Cart shutdown complete.");
        Ok(())
    }
}
