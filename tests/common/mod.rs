//! In-process stand-in for the backend API, served by axum on a random port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pos_terminal::model::{Product, PurchaseReceipt, PurchaseRequest};
use reqwest::Url;
use tokio::task::JoinHandle;

pub const TEA: &str = "4901681517305";
pub const COLA: &str = "4902102072618";
/// Code whose product name and code need percent-encoding in the path.
pub const ODD_CODE: &str = "TEA 500/24";
/// Answered with 404.
pub const MISSING: &str = "0000000000000";
/// Answered with 500.
pub const BROKEN: &str = "5000000000000";
/// Cashier code for which the purchase endpoint fails.
pub const FAILING_CASHIER: &str = "fail";
/// Id given to the first purchase; later ones count up.
pub const FIRST_PURCHASE_ID: i64 = 42;

pub fn catalog() -> Vec<Product> {
    vec![
        Product::new(TEA, "Green Tea", 150).with_category("Drinks").with_stock(24),
        Product::new(COLA, "Cola", 160).with_category("Drinks").with_stock(12),
        Product::new(ODD_CODE, "Tea Case", 3200).with_description("24 bottles"),
    ]
}

#[derive(Default)]
struct Ledger {
    requests: Vec<PurchaseRequest>,
    receipts: Vec<PurchaseReceipt>,
}

type Shared = Arc<Mutex<Ledger>>;

pub struct StubBackend {
    pub base: Url,
    ledger: Shared,
    task: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let ledger = Shared::default();
        let app = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/search/{keyword}", get(search_products))
            .route("/api/products/{code}", get(get_product))
            .route("/api/purchase", post(create_purchase))
            .route("/api/purchase/{id}", get(get_purchase))
            .with_state(ledger.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: Url::parse(&format!("http://{addr}")).unwrap(),
            ledger,
            task,
        }
    }

    /// Purchase bodies received so far.
    pub fn purchases(&self) -> Vec<PurchaseRequest> {
        self.ledger.lock().unwrap().requests.clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn list_products() -> Json<Vec<Product>> {
    Json(catalog())
}

async fn search_products(Path(keyword): Path<String>) -> Json<Vec<Product>> {
    let keyword = keyword.to_lowercase();
    Json(
        catalog()
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&keyword))
            .collect(),
    )
}

async fn get_product(Path(code): Path<String>) -> Response {
    if code == BROKEN {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    match catalog().into_iter().find(|p| p.code == code) {
        Some(product) => Json(product).into_response(),
        None => (StatusCode::NOT_FOUND, "Product not found").into_response(),
    }
}

async fn create_purchase(State(ledger): State<Shared>, Json(request): Json<PurchaseRequest>) -> Response {
    if request.cashier_code == FAILING_CASHIER {
        return (StatusCode::INTERNAL_SERVER_ERROR, "purchase rejected").into_response();
    }

    let mut ledger = ledger.lock().unwrap();
    let receipt = PurchaseReceipt {
        purchase_id: FIRST_PURCHASE_ID + ledger.receipts.len() as i64,
        total_amount: request.items.iter().map(|line| line.subtotal()).sum(),
        purchase_datetime: "2024-05-01T10:00:00".to_string(),
        cashier_code: request.cashier_code.clone(),
        items: request.items.clone(),
    };
    ledger.requests.push(request);
    ledger.receipts.push(receipt.clone());
    (StatusCode::CREATED, Json(receipt)).into_response()
}

async fn get_purchase(State(ledger): State<Shared>, Path(id): Path<i64>) -> Response {
    let ledger = ledger.lock().unwrap();
    match ledger.receipts.iter().find(|r| r.purchase_id == id) {
        Some(receipt) => Json(receipt.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Purchase not found").into_response(),
    }
}
