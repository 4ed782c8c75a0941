use serde::{Deserialize, Serialize};

use crate::model::Product;

/// One entry of the purchase cart.
///
/// Name and price are denormalized copies taken when the product was first
/// added. Later price changes upstream do not touch existing lines.
///
/// The same shape is used on the wire for `items` in both the purchase request
/// and the receipt echoed back by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_code: String,
    pub product_name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshots `product` into a new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_code: product.code.clone(),
            product_name: product.name.clone(),
            unit_price: product.price_with_tax,
            quantity: 1,
        }
    }

    /// `unit_price × quantity`, saturating at `u64::MAX`.
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}
