use serde::{Deserialize, Serialize};

/// Represents a catalog entry as served by `GET /api/products/{code}`.
///
/// A `Product` is immutable once fetched. The page controller holds it between
/// the lookup and the add-to-cart step, at which point it is turned into a
/// [`CartLine`](crate::model::CartLine) snapshot.
///
/// `stock_quantity` and `is_active` are informational only: nothing in the
/// cart checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Lookup key (e.g. a JAN/EAN barcode). Opaque to the client.
    #[serde(rename = "product_code")]
    pub code: String,

    #[serde(rename = "product_name")]
    pub name: String,

    /// Tax-inclusive unit price in the smallest currency unit.
    pub price_with_tax: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub stock_quantity: u32,

    pub is_active: bool,
}

impl Product {
    /// Creates an active product with no category or description.
    ///
    /// # Arguments
    /// * `code` - Product code used as the lookup key
    /// * `name` - Display name
    /// * `price_with_tax` - Tax-inclusive price in minor units
    pub fn new(code: impl Into<String>, name: impl Into<String>, price_with_tax: u64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price_with_tax,
            category: None,
            description: None,
            stock_quantity: 0,
            is_active: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stock(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }
}
