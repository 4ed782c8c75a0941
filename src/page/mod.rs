//! Page controller: the state machine behind the checkout screen.
//!
//! ```text
//!            scan / load                    add
//!   Idle ───────────────▶ Loading ──▶ Idle ─────▶ Idle (cart + 1)
//!    │
//!    │ checkout (cart not empty)          dismiss
//!    └──────────────────▶ Submitting ──▶ Confirming ───────▶ Idle
//! ```
//!
//! Failures return to `Idle` with the message in [`PageState::error`].

pub mod controller;
pub mod error;
pub mod handle;
pub mod state;

pub use controller::*;
pub use error::*;
pub use handle::*;
pub use state::*;

use std::sync::Arc;

use crate::clients::{CatalogApi, CheckoutApi};

/// Creates a new page controller and its handle.
///
/// The controller does nothing until [`PageController::run`] is spawned.
pub fn new(
    catalog: Arc<dyn CatalogApi>,
    checkout: Arc<dyn CheckoutApi>,
    settings: CheckoutSettings,
) -> (PageController, PageHandle) {
    PageController::new(32, catalog, checkout, settings)
}
