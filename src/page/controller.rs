//! # Page Controller
//!
//! The controller owns the [`PageState`] and is the only thing that mutates
//! it. It runs as a single Tokio task and processes [`PageRequest`]s one at a
//! time, so there are no locks around the state.
//!
//! ## Network calls
//!
//! A product lookup or purchase does not block the loop. The call is spawned
//! onto its own task and the loop joins that task alongside incoming
//! requests. In the meantime the loop keeps serving other requests: the code
//! field can be edited and the cart adjusted while a lookup is running.
//!
//! The caller that started the call gets its reply when the call finishes, not
//! when it starts. If the call task panics, the caller still gets a reply and
//! the failure shows up in the message slot.
//!
//! ## Re-entrancy
//!
//! At most one call is in flight. While one is, a second lookup or checkout is
//! answered with [`ControllerError::Busy`] and state is left alone. Cart edits
//! are also refused during a purchase submission, so the cart that gets
//! cleared on success is exactly the cart that was submitted.
//!
//! ## Shutdown
//!
//! The loop ends once every [`PageHandle`] is dropped. A call still in flight
//! at that point is aborted and its result discarded.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::clients::{CatalogApi, CheckoutApi, ClientError};
use crate::config::SELF_CHECKOUT_CASHIER_CODE;
use crate::model::{Product, PurchaseReceipt, PurchaseRequest};
use crate::page::{ControllerError, PageHandle, PageState, PendingCall};

/// Shown when a lookup is requested with a blank code.
pub const ENTER_CODE_MESSAGE: &str = "Enter a product code";
/// Shown when "add" is requested with no product loaded.
pub const LOAD_PRODUCT_FIRST_MESSAGE: &str = "Load a product first";
/// Shown when checkout is requested with an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "The cart is empty";

/// One-shot reply channel for a [`PageRequest`].
pub type Response<T> = oneshot::Sender<Result<T, ControllerError>>;

/// User actions, one variant per control on the page.
///
/// Every request is answered with a snapshot of the state after it was
/// applied.
#[derive(Debug)]
pub enum PageRequest {
    SetCode {
        code: String,
        respond_to: Response<PageState>,
    },
    LoadProduct {
        respond_to: Response<PageState>,
    },
    /// Sets the code and looks it up in one step. Refused as a whole while
    /// busy, so the code field is left as it was.
    Scan {
        code: String,
        respond_to: Response<PageState>,
    },
    AddToCart {
        respond_to: Response<PageState>,
    },
    SetQuantity {
        index: usize,
        quantity: i64,
        respond_to: Response<PageState>,
    },
    AdjustQuantity {
        index: usize,
        delta: i64,
        respond_to: Response<PageState>,
    },
    RemoveLine {
        index: usize,
        respond_to: Response<PageState>,
    },
    Checkout {
        respond_to: Response<PageState>,
    },
    DismissReceipt {
        respond_to: Response<PageState>,
    },
    Snapshot {
        respond_to: Response<PageState>,
    },
}

/// Deployment settings applied to every purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// `cashier_code` sent with each purchase.
    pub cashier_code: String,
    pub store_code: Option<String>,
    pub customer_id: Option<String>,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            cashier_code: SELF_CHECKOUT_CASHIER_CODE.to_string(),
            store_code: None,
            customer_id: None,
        }
    }
}

/// Output of a spawned network call.
enum Completion {
    ProductLookup(Result<Product, ClientError>),
    PurchaseSubmission(Result<PurchaseReceipt, ClientError>),
}

struct InFlight {
    respond_to: Response<PageState>,
    task: JoinHandle<Completion>,
}

/// Waits for the call in flight. Never resolves when there is none.
async fn join(in_flight: &mut Option<InFlight>) -> Result<Completion, JoinError> {
    match in_flight {
        Some(flight) => (&mut flight.task).await,
        None => std::future::pending().await,
    }
}

/// The actor that owns the page state.
pub struct PageController {
    receiver: mpsc::Receiver<PageRequest>,
    catalog: Arc<dyn CatalogApi>,
    checkout: Arc<dyn CheckoutApi>,
    settings: CheckoutSettings,
    state: PageState,
    updates: watch::Sender<PageState>,
}

impl PageController {
    pub fn new(
        buffer_size: usize,
        catalog: Arc<dyn CatalogApi>,
        checkout: Arc<dyn CheckoutApi>,
        settings: CheckoutSettings,
    ) -> (Self, PageHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (updates, watcher) = watch::channel(PageState::default());
        let controller = Self {
            receiver,
            catalog,
            checkout,
            settings,
            state: PageState::default(),
            updates,
        };
        (controller, PageHandle::new(sender, watcher))
    }

    /// Runs the event loop until every handle is dropped.
    pub async fn run(mut self) {
        info!(cashier = %self.settings.cashier_code, "Page controller started");

        let mut in_flight: Option<InFlight> = None;

        loop {
            tokio::select! {
                joined = join(&mut in_flight), if in_flight.is_some() => {
                    match joined {
                        Ok(completion) => self.complete(completion),
                        Err(e) => self.task_failed(e),
                    }
                    if let Some(flight) = in_flight.take() {
                        self.reply(flight.respond_to);
                    }
                }
                request = self.receiver.recv() => {
                    let Some(request) = request else { break };
                    self.handle(request, &mut in_flight);
                }
            }
            self.publish();
        }

        if let Some(flight) = in_flight.take() {
            warn!(pending = ?self.state.pending, "Aborting in-flight call");
            flight.task.abort();
        }
        info!(lines = self.state.cart.len(), "Page controller shut down");
    }

    fn handle(&mut self, request: PageRequest, in_flight: &mut Option<InFlight>) {
        match request {
            PageRequest::SetCode { code, respond_to } => {
                debug!(%code, "SetCode");
                self.state.entered_code = code;
                self.reply(respond_to);
            }
            PageRequest::LoadProduct { respond_to } => {
                debug!(code = %self.state.entered_code, "LoadProduct");
                self.load_product(respond_to, in_flight);
            }
            PageRequest::Scan { code, respond_to } => {
                debug!(%code, "Scan");
                let Some(respond_to) = self.unless_busy(respond_to) else { return };
                self.state.entered_code = code;
                self.load_product(respond_to, in_flight);
            }
            PageRequest::AddToCart { respond_to } => {
                debug!("AddToCart");
                let Some(respond_to) = self.unless_submitting(respond_to) else { return };
                self.add_to_cart();
                self.reply(respond_to);
            }
            PageRequest::SetQuantity { index, quantity, respond_to } => {
                debug!(index, quantity, "SetQuantity");
                let Some(respond_to) = self.unless_submitting(respond_to) else { return };
                self.state.cart.set_quantity(index, quantity);
                self.reply(respond_to);
            }
            PageRequest::AdjustQuantity { index, delta, respond_to } => {
                debug!(index, delta, "AdjustQuantity");
                let Some(respond_to) = self.unless_submitting(respond_to) else { return };
                self.state.cart.adjust_quantity(index, delta);
                self.reply(respond_to);
            }
            PageRequest::RemoveLine { index, respond_to } => {
                debug!(index, "RemoveLine");
                let Some(respond_to) = self.unless_submitting(respond_to) else { return };
                if let Some(line) = self.state.cart.remove(index) {
                    info!(code = %line.product_code, index, "Line removed");
                }
                self.reply(respond_to);
            }
            PageRequest::Checkout { respond_to } => {
                debug!(lines = self.state.cart.len(), "Checkout");
                self.checkout(respond_to, in_flight);
            }
            PageRequest::DismissReceipt { respond_to } => {
                debug!("DismissReceipt");
                self.state.last_receipt = None;
                self.reply(respond_to);
            }
            PageRequest::Snapshot { respond_to } => {
                self.reply(respond_to);
            }
        }
    }

    fn load_product(&mut self, respond_to: Response<PageState>, in_flight: &mut Option<InFlight>) {
        let Some(respond_to) = self.unless_busy(respond_to) else { return };

        let code = self.state.entered_code.trim().to_string();
        if code.is_empty() {
            self.state.error = Some(ENTER_CODE_MESSAGE.to_string());
            self.reply(respond_to);
            return;
        }

        self.state.pending = Some(PendingCall::ProductLookup);
        self.state.error = None;

        let catalog = Arc::clone(&self.catalog);
        let task = tokio::spawn(async move {
            Completion::ProductLookup(catalog.fetch_product_by_code(&code).await)
        });
        *in_flight = Some(InFlight { respond_to, task });
    }

    fn add_to_cart(&mut self) {
        match self.state.loaded_product.take() {
            Some(product) => {
                let index = self.state.cart.add_or_merge(&product);
                info!(code = %product.code, index, total = self.state.cart.total(), "Added to cart");
                self.state.entered_code.clear();
                self.state.error = None;
            }
            None => {
                self.state.error = Some(LOAD_PRODUCT_FIRST_MESSAGE.to_string());
            }
        }
    }

    fn checkout(&mut self, respond_to: Response<PageState>, in_flight: &mut Option<InFlight>) {
        let Some(respond_to) = self.unless_busy(respond_to) else { return };

        if self.state.cart.is_empty() {
            self.state.error = Some(EMPTY_CART_MESSAGE.to_string());
            self.reply(respond_to);
            return;
        }

        self.state.pending = Some(PendingCall::PurchaseSubmission);
        self.state.error = None;

        let request = PurchaseRequest::new(self.state.cart.lines().to_vec(), self.settings.cashier_code.clone())
            .with_store_code(self.settings.store_code.clone())
            .with_customer_id(self.settings.customer_id.clone());
        info!(lines = request.items.len(), total = self.state.cart.total(), "Submitting purchase");

        let checkout = Arc::clone(&self.checkout);
        let task = tokio::spawn(async move {
            Completion::PurchaseSubmission(checkout.submit_purchase(request).await)
        });
        *in_flight = Some(InFlight { respond_to, task });
    }

    fn complete(&mut self, completion: Completion) {
        self.state.pending = None;
        match completion {
            Completion::ProductLookup(Ok(product)) => {
                info!(code = %product.code, "Lookup ok");
                self.state.loaded_product = Some(product);
                self.state.error = None;
            }
            Completion::ProductLookup(Err(e)) => {
                warn!(error = ?e, "Lookup failed");
                self.state.loaded_product = None;
                self.state.error = Some(e.to_string());
            }
            Completion::PurchaseSubmission(Ok(receipt)) => {
                info!(purchase_id = receipt.purchase_id, total = receipt.total_amount, "Purchase ok");
                self.state.cart.clear();
                self.state.loaded_product = None;
                self.state.entered_code.clear();
                self.state.last_receipt = Some(receipt);
            }
            Completion::PurchaseSubmission(Err(e)) => {
                warn!(error = ?e, "Purchase failed");
                self.state.error = Some(e.to_string());
            }
        }
    }

    /// The call task ended without a result. The cart is kept as it was.
    fn task_failed(&mut self, e: JoinError) {
        error!(error = %e, pending = ?self.state.pending, "Call task failed");
        if self.state.pending == Some(PendingCall::ProductLookup) {
            self.state.loaded_product = None;
        }
        self.state.pending = None;
        self.state.error = Some(ControllerError::TaskFailed(e.to_string()).to_string());
    }

    /// Passes `respond_to` back unless a call is in flight, in which case the
    /// request is answered with [`ControllerError::Busy`].
    fn unless_busy(&self, respond_to: Response<PageState>) -> Option<Response<PageState>> {
        if self.state.busy() {
            self.refuse(respond_to);
            None
        } else {
            Some(respond_to)
        }
    }

    fn unless_submitting(&self, respond_to: Response<PageState>) -> Option<Response<PageState>> {
        if self.state.pending == Some(PendingCall::PurchaseSubmission) {
            self.refuse(respond_to);
            None
        } else {
            Some(respond_to)
        }
    }

    fn refuse(&self, respond_to: Response<PageState>) {
        warn!(pending = ?self.state.pending, "Busy, request refused");
        let _ = respond_to.send(Err(ControllerError::Busy));
    }

    fn reply(&self, respond_to: Response<PageState>) {
        let _ = respond_to.send(Ok(self.state.clone()));
    }

    fn publish(&self) {
        self.updates.send_if_modified(|current| {
            if *current == self.state {
                false
            } else {
                *current = self.state.clone();
                true
            }
        });
    }
}
