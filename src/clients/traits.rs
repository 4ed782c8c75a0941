use async_trait::async_trait;

use crate::clients::ClientError;
use crate::model::{Product, PurchaseReceipt, PurchaseRequest};

/// Read side of the backend: product lookup, listing and search.
///
/// The page controller only needs [`fetch_product_by_code`](CatalogApi::fetch_product_by_code);
/// listing and search back the terminal's browse commands.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches a single product by its code.
    ///
    /// The caller trims and validates `code`; implementations pass it through
    /// untouched. A missing product is reported as [`ClientError::NotFound`].
    async fn fetch_product_by_code(&self, code: &str) -> Result<Product, ClientError>;

    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, ClientError>;
}

/// Write side of the backend: purchase submission and receipt lookup.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// Submits a purchase. All-or-nothing: any failure is a single
    /// [`ClientError::OperationFailed`].
    ///
    /// Callers must not submit an empty `items` list.
    async fn submit_purchase(&self, request: PurchaseRequest) -> Result<PurchaseReceipt, ClientError>;

    async fn get_purchase(&self, purchase_id: i64) -> Result<PurchaseReceipt, ClientError>;
}
