use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::page::{ControllerError, PageRequest, PageState, Response};

/// Cloneable handle to a running [`PageController`](crate::page::PageController).
///
/// Each method sends one user action and resolves to the state after the
/// action was applied. For a lookup or checkout that is the state after the
/// network call finished.
#[derive(Debug, Clone)]
pub struct PageHandle {
    sender: mpsc::Sender<PageRequest>,
    updates: watch::Receiver<PageState>,
}

impl PageHandle {
    pub(crate) fn new(sender: mpsc::Sender<PageRequest>, updates: watch::Receiver<PageState>) -> Self {
        Self { sender, updates }
    }

    /// Replaces the text of the code field.
    pub async fn set_code(&self, code: impl Into<String>) -> Result<PageState, ControllerError> {
        let code = code.into();
        self.request(|respond_to| PageRequest::SetCode { code, respond_to }).await
    }

    /// Looks up the product for the current code.
    #[instrument(skip(self))]
    pub async fn load_product(&self) -> Result<PageState, ControllerError> {
        debug!("Sending request");
        self.request(|respond_to| PageRequest::LoadProduct { respond_to }).await
    }

    /// Types `code` into the field and looks it up, like a barcode scan.
    ///
    /// Refused with [`ControllerError::Busy`] while a call is in flight, in
    /// which case the code field keeps its old text.
    #[instrument(skip(self, code))]
    pub async fn scan(&self, code: impl Into<String>) -> Result<PageState, ControllerError> {
        let code = code.into();
        debug!(%code, "Sending request");
        self.request(|respond_to| PageRequest::Scan { code, respond_to }).await
    }

    /// Adds the loaded product to the cart.
    pub async fn add_to_cart(&self) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::AddToCart { respond_to }).await
    }

    /// Sets the quantity of the line at `index` (0-based). Values below 1 are ignored.
    pub async fn set_quantity(&self, index: usize, quantity: i64) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::SetQuantity { index, quantity, respond_to })
            .await
    }

    pub async fn increment(&self, index: usize) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::AdjustQuantity { index, delta: 1, respond_to })
            .await
    }

    /// Decrements the line at `index`, never below 1.
    pub async fn decrement(&self, index: usize) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::AdjustQuantity { index, delta: -1, respond_to })
            .await
    }

    pub async fn remove_line(&self, index: usize) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::RemoveLine { index, respond_to }).await
    }

    /// Submits the cart as a purchase.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<PageState, ControllerError> {
        debug!("Sending request");
        self.request(|respond_to| PageRequest::Checkout { respond_to }).await
    }

    /// Closes the receipt shown after a successful checkout.
    pub async fn dismiss_receipt(&self) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::DismissReceipt { respond_to }).await
    }

    pub async fn snapshot(&self) -> Result<PageState, ControllerError> {
        self.request(|respond_to| PageRequest::Snapshot { respond_to }).await
    }

    /// Receiver that sees every state change, including those made by other
    /// handles and by calls completing in the background.
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.updates.clone()
    }

    async fn request(
        &self,
        make: impl FnOnce(Response<PageState>) -> PageRequest,
    ) -> Result<PageState, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ControllerDropped)?
    }
}
