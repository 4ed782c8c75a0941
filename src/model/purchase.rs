use serde::{Deserialize, Serialize};

use crate::model::CartLine;

/// Body of `POST /api/purchase`.
///
/// `customer_id` and `store_code` are optional and left out of the JSON when
/// unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub items: Vec<CartLine>,
    pub cashier_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_code: Option<String>,
}

impl PurchaseRequest {
    pub fn new(items: Vec<CartLine>, cashier_code: impl Into<String>) -> Self {
        Self {
            items,
            cashier_code: cashier_code.into(),
            customer_id: None,
            store_code: None,
        }
    }

    pub fn with_store_code(mut self, store_code: Option<String>) -> Self {
        self.store_code = store_code;
        self
    }

    pub fn with_customer_id(mut self, customer_id: Option<String>) -> Self {
        self.customer_id = customer_id;
        self
    }
}

/// Server-confirmed record of a completed purchase.
///
/// `total_amount` is computed by the server and is the only total that may be
/// shown once the purchase went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub purchase_id: i64,
    pub total_amount: u64,
    pub purchase_datetime: String,
    pub cashier_code: String,
    #[serde(default)]
    pub items: Vec<CartLine>,
}
