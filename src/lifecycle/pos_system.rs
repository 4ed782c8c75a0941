use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::{CatalogClient, CheckoutClient};
use crate::config::{ConfigError, PosConfig};
use crate::page::{self, ControllerError, PageHandle};

/// A running terminal: the page controller plus the backend clients it uses.
///
/// The clients are exposed for the read-only screens (product list, search,
/// receipt lookup) that do not go through the page state.
pub struct PosSystem {
    /// Handle to the checkout page.
    pub page: PageHandle,

    pub catalog: CatalogClient,

    pub checkout: CheckoutClient,

    handle: JoinHandle<()>,
}

impl PosSystem {
    /// Builds the clients and spawns the page controller.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &PosConfig) -> Result<Self, ConfigError> {
        let base = config.api_base()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let catalog = CatalogClient::new(http.clone(), base.clone());
        let checkout = CheckoutClient::new(http, base);

        let (controller, page) = page::new(
            Arc::new(catalog.clone()),
            Arc::new(checkout.clone()),
            config.checkout_settings(),
        );
        let handle = tokio::spawn(controller.run());

        info!(api = %config.api_url, "Terminal started");

        Ok(Self {
            page,
            catalog,
            checkout,
            handle,
        })
    }

    /// Stops the page controller.
    ///
    /// Any lookup or purchase still in flight is abandoned. Clones of
    /// [`PosSystem::page`] held elsewhere keep the controller alive, so drop
    /// them first.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::TaskFailed`] if the controller task panicked.
    pub async fn shutdown(self) -> Result<(), ControllerError> {
        info!("Shutting down terminal...");

        drop(self.page);

        if let Err(e) = self.handle.await {
            error!("Page controller task failed: {:?}", e);
            return Err(ControllerError::TaskFailed(e.to_string()));
        }

        info!("Terminal shutdown complete.");
        Ok(())
    }
}
