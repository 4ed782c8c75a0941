//! # Catalog Client
//!
//! HTTP client for the product endpoints of the backend API:
//!
//! - `GET /api/products/{code}`
//! - `GET /api/products`
//! - `GET /api/products/search/{keyword}`
//!
//! Every call goes to the network. There is no cache and no retry.
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, instrument};

use crate::clients::http::{endpoint, parse_response};
use crate::clients::{CatalogApi, ClientError, Operation};
use crate::model::Product;

/// Client for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base: Url,
}

impl CatalogClient {
    /// Creates a catalog client that shares the given connection pool.
    ///
    /// * `base` - API origin, e.g. `http://localhost:8000`.
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn fetch_product_by_code(&self, code: &str) -> Result<Product, ClientError> {
        let url = endpoint(&self.base, Operation::FetchProduct, &["api", "products", code])?;
        debug!(%url, "Sending request");

        let product: Product = parse_response(Operation::FetchProduct, self.http.get(url).send().await).await?;
        info!(code = %product.code, price = product.price_with_tax, "Product loaded");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = endpoint(&self.base, Operation::ListProducts, &["api", "products"])?;
        debug!(%url, "Sending request");

        let products: Vec<Product> = parse_response(Operation::ListProducts, self.http.get(url).send().await).await?;
        info!(count = products.len(), "Products listed");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, ClientError> {
        let url = endpoint(&self.base, Operation::SearchProducts, &["api", "products", "search", keyword])?;
        debug!(%url, "Sending request");

        let products: Vec<Product> = parse_response(Operation::SearchProducts, self.http.get(url).send().await).await?;
        info!(count = products.len(), "Search finished");
        Ok(products)
    }
}
