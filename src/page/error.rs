//! Error types for the page controller.

use thiserror::Error;

/// Errors from talking to the page controller itself.
///
/// Failures of the checkout flow (unknown product, empty cart, failed
/// purchase) are not errors at this level. They land in
/// [`PageState::error`](crate::page::PageState::error) for the cashier to read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// A lookup or purchase is already in flight. The request was dropped
    /// without touching state.
    #[error("Another request is in progress")]
    Busy,

    #[error("Page controller closed")]
    ControllerClosed,

    #[error("Page controller dropped response channel")]
    ControllerDropped,

    #[error("Page controller task failed: {0}")]
    TaskFailed(String),
}
