//! # Checkout Client
//!
//! HTTP client for the purchase endpoints of the backend API:
//!
//! - `POST /api/purchase`
//! - `GET /api/purchase/{id}`
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, instrument};

use crate::clients::http::{endpoint, parse_response};
use crate::clients::{CheckoutApi, ClientError, Operation};
use crate::model::{PurchaseReceipt, PurchaseRequest};

/// Client for purchase submission and receipt lookup.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: reqwest::Client,
    base: Url,
}

impl CheckoutClient {
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }
}

#[async_trait]
impl CheckoutApi for CheckoutClient {
    #[instrument(skip(self, request), fields(lines = request.items.len(), cashier = %request.cashier_code))]
    async fn submit_purchase(&self, request: PurchaseRequest) -> Result<PurchaseReceipt, ClientError> {
        debug!(?request, "submit_purchase called");
        let url = endpoint(&self.base, Operation::SubmitPurchase, &["api", "purchase"])?;

        let receipt: PurchaseReceipt = parse_response(
            Operation::SubmitPurchase,
            self.http.post(url).json(&request).send().await,
        )
        .await?;
        info!(purchase_id = receipt.purchase_id, total = receipt.total_amount, "Purchase recorded");
        Ok(receipt)
    }

    #[instrument(skip(self))]
    async fn get_purchase(&self, purchase_id: i64) -> Result<PurchaseReceipt, ClientError> {
        let id = purchase_id.to_string();
        let url = endpoint(&self.base, Operation::GetPurchase, &["api", "purchase", &id])?;
        debug!(%url, "Sending request");

        parse_response(Operation::GetPurchase, self.http.get(url).send().await).await
    }
}
