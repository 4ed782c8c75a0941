use crate::cart::Cart;
use crate::model::{Product, PurchaseReceipt};

/// The network call currently in flight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    ProductLookup,
    PurchaseSubmission,
}

/// Where the page is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Submitting,
    /// A purchase went through and its receipt is on screen.
    Confirming,
}

/// Everything the page shows.
///
/// Owned by the controller task; callers only ever see snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    /// Raw text of the code field, untrimmed.
    pub entered_code: String,
    pub loaded_product: Option<Product>,
    pub cart: Cart,
    pub pending: Option<PendingCall>,
    /// The single user-visible message slot.
    pub error: Option<String>,
    pub last_receipt: Option<PurchaseReceipt>,
}

impl PageState {
    /// `true` while a lookup or purchase is in flight.
    pub fn busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(PendingCall::ProductLookup) => Phase::Loading,
            Some(PendingCall::PurchaseSubmission) => Phase::Submitting,
            None if self.last_receipt.is_some() => Phase::Confirming,
            None => Phase::Idle,
        }
    }
}
