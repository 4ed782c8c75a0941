//! Error types for the backend clients.

use std::fmt::Display;

use thiserror::Error;

/// The backend operations a client can perform.
///
/// Each operation owns the user-facing message shown when it fails, so every
/// failure of the same operation reads the same regardless of the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchProduct,
    ListProducts,
    SearchProducts,
    SubmitPurchase,
    GetPurchase,
}

impl Operation {
    /// Message used for any non-success outcome other than "not found".
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::FetchProduct => "Failed to fetch product",
            Operation::ListProducts => "Failed to fetch products",
            Operation::SearchProducts => "Failed to search products",
            Operation::SubmitPurchase => "Purchase failed",
            Operation::GetPurchase => "Failed to fetch purchase",
        }
    }

    /// Message for a 404, for operations where "not found" is meaningful.
    pub fn not_found_message(self) -> Option<&'static str> {
        match self {
            Operation::FetchProduct => Some("Product not found"),
            Operation::GetPurchase => Some("Purchase not found"),
            _ => None,
        }
    }
}

/// Errors returned by [`CatalogApi`](crate::clients::CatalogApi) and
/// [`CheckoutApi`](crate::clients::CheckoutApi) implementations.
///
/// The `Display` text is meant for the cashier. The technical cause of an
/// `OperationFailed` lives in `reason` and goes to the logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The backend answered 404 for a lookup.
    #[error("{0}")]
    NotFound(String),

    /// Any other non-success outcome: error status, transport failure or an
    /// unreadable body.
    #[error("{message}")]
    OperationFailed { message: String, reason: String },
}

impl ClientError {
    pub fn not_found(operation: Operation) -> Self {
        let message = operation
            .not_found_message()
            .unwrap_or_else(|| operation.failure_message());
        ClientError::NotFound(message.to_string())
    }

    pub fn failed(operation: Operation, reason: impl Display) -> Self {
        ClientError::OperationFailed {
            message: operation.failure_message().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
