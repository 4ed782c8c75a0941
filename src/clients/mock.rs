//! # Mock Backends
//!
//! In-memory [`CatalogApi`] and [`CheckoutApi`] implementations for testing the
//! page controller without an HTTP server.
//!
//! Expectations are queued in order and consumed one per call:
//!
//! ```ignore
//! let catalog = MockCatalog::new();
//! catalog.expect_fetch("4901681517305").return_ok(Product::new("4901681517305", "Tea", 150));
//! catalog.expect_fetch("0000000000000").return_err(ClientError::not_found(Operation::FetchProduct));
//!
//! // hand `Arc::new(catalog.clone())` to the controller, drive it ...
//! catalog.verify(); // every expectation used, nothing unexpected
//! ```
//!
//! A call that does not match the next expectation is answered with
//! [`ClientError::OperationFailed`] and recorded; [`MockCatalog::verify`]
//! reports it. Responses can be held back with `return_deferred`, which hands
//! the test a sender to resolve the call later.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::clients::{CatalogApi, CheckoutApi, ClientError, Operation};
use crate::model::{Product, PurchaseReceipt, PurchaseRequest};

// =============================================================================
// SHARED EXPECTATION QUEUE
// =============================================================================

/// How an expectation answers once it is matched.
enum Reply<T> {
    Ready(Result<T, ClientError>),
    Deferred(oneshot::Receiver<Result<T, ClientError>>),
}

impl<T> Reply<T> {
    async fn resolve(self, operation: Operation) -> Result<T, ClientError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Deferred(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ClientError::failed(operation, "mock response dropped"))),
        }
    }
}

struct Queue<E> {
    expectations: VecDeque<E>,
    unexpected: Vec<String>,
    calls: usize,
}

impl<E> Default for Queue<E> {
    fn default() -> Self {
        Self {
            expectations: VecDeque::new(),
            unexpected: Vec::new(),
            calls: 0,
        }
    }
}

fn lock<E>(queue: &Mutex<Queue<E>>) -> MutexGuard<'_, Queue<E>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

fn verify_queue<E>(name: &str, queue: &Mutex<Queue<E>>) {
    let queue = lock(queue);
    if !queue.unexpected.is_empty() {
        panic!("{name}: unexpected calls: {:?}", queue.unexpected);
    }
    if !queue.expectations.is_empty() {
        panic!("{name}: not all expectations were met. {} remaining", queue.expectations.len());
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ReplyBuilder<E, T> {
    queue: Arc<Mutex<Queue<E>>>,
    make: Box<dyn FnOnce(Reply<T>) -> E + Send>,
}

impl<E, T> ReplyBuilder<E, T> {
    /// Answers the call with `value`.
    pub fn return_ok(self, value: T) {
        self.push(Reply::Ready(Ok(value)));
    }

    /// Answers the call with `error`.
    pub fn return_err(self, error: ClientError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Holds the call open until the returned sender is used.
    pub fn return_deferred(self) -> oneshot::Sender<Result<T, ClientError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Deferred(receiver));
        sender
    }

    fn push(self, reply: Reply<T>) {
        let expectation = (self.make)(reply);
        lock(&self.queue).expectations.push_back(expectation);
    }
}

// =============================================================================
// CATALOG
// =============================================================================

enum CatalogCall {
    Fetch { code: String, reply: Reply<Product> },
    List { reply: Reply<Vec<Product>> },
    Search { keyword: String, reply: Reply<Vec<Product>> },
}

/// A queued catalog expectation.
pub struct CatalogExpectation(CatalogCall);

/// Mock product catalog.
#[derive(Clone, Default)]
pub struct MockCatalog {
    queue: Arc<Mutex<Queue<CatalogExpectation>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects `fetch_product_by_code(code)`.
    pub fn expect_fetch(&self, code: impl Into<String>) -> ReplyBuilder<CatalogExpectation, Product> {
        let code = code.into();
        ReplyBuilder {
            queue: self.queue.clone(),
            make: Box::new(move |reply| CatalogExpectation(CatalogCall::Fetch { code, reply })),
        }
    }

    /// Expects `list_products()`.
    pub fn expect_list(&self) -> ReplyBuilder<CatalogExpectation, Vec<Product>> {
        ReplyBuilder {
            queue: self.queue.clone(),
            make: Box::new(|reply| CatalogExpectation(CatalogCall::List { reply })),
        }
    }

    /// Expects `search_products(keyword)`.
    pub fn expect_search(&self, keyword: impl Into<String>) -> ReplyBuilder<CatalogExpectation, Vec<Product>> {
        let keyword = keyword.into();
        ReplyBuilder {
            queue: self.queue.clone(),
            make: Box::new(move |reply| CatalogExpectation(CatalogCall::Search { keyword, reply })),
        }
    }

    /// Number of calls received so far, matched or not.
    pub fn calls(&self) -> usize {
        lock(&self.queue).calls
    }

    /// Panics if an expectation is left over or an unexpected call was made.
    pub fn verify(&self) {
        verify_queue("MockCatalog", &self.queue);
    }

    fn next(&self) -> Option<CatalogExpectation> {
        let mut queue = lock(&self.queue);
        queue.calls += 1;
        queue.expectations.pop_front()
    }

    fn mismatch(&self, call: String, operation: Operation) -> ClientError {
        let error = ClientError::failed(operation, format!("unexpected call {call}"));
        lock(&self.queue).unexpected.push(call);
        error
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn fetch_product_by_code(&self, code: &str) -> Result<Product, ClientError> {
        let call = format!("fetch_product_by_code({code})");
        match self.next() {
            Some(CatalogExpectation(CatalogCall::Fetch { code: expected, reply })) if expected == code => {
                reply.resolve(Operation::FetchProduct).await
            }
            _ => Err(self.mismatch(call, Operation::FetchProduct)),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let call = "list_products()".to_string();
        match self.next() {
            Some(CatalogExpectation(CatalogCall::List { reply })) => reply.resolve(Operation::ListProducts).await,
            _ => Err(self.mismatch(call, Operation::ListProducts)),
        }
    }

    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, ClientError> {
        let call = format!("search_products({keyword})");
        match self.next() {
            Some(CatalogExpectation(CatalogCall::Search { keyword: expected, reply })) if expected == keyword => {
                reply.resolve(Operation::SearchProducts).await
            }
            _ => Err(self.mismatch(call, Operation::SearchProducts)),
        }
    }
}

// =============================================================================
// CHECKOUT
// =============================================================================

enum CheckoutCall {
    Submit { reply: Reply<PurchaseReceipt> },
    Get { purchase_id: i64, reply: Reply<PurchaseReceipt> },
}

/// A queued checkout expectation.
pub struct CheckoutExpectation(CheckoutCall);

/// Mock purchase backend. Submitted requests are kept for inspection.
#[derive(Clone, Default)]
pub struct MockCheckout {
    queue: Arc<Mutex<Queue<CheckoutExpectation>>>,
    submitted: Arc<Mutex<Vec<PurchaseRequest>>>,
}

impl MockCheckout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects `submit_purchase(..)` with any request.
    pub fn expect_submit(&self) -> ReplyBuilder<CheckoutExpectation, PurchaseReceipt> {
        ReplyBuilder {
            queue: self.queue.clone(),
            make: Box::new(|reply| CheckoutExpectation(CheckoutCall::Submit { reply })),
        }
    }

    /// Expects `get_purchase(purchase_id)`.
    pub fn expect_get(&self, purchase_id: i64) -> ReplyBuilder<CheckoutExpectation, PurchaseReceipt> {
        ReplyBuilder {
            queue: self.queue.clone(),
            make: Box::new(move |reply| CheckoutExpectation(CheckoutCall::Get { purchase_id, reply })),
        }
    }

    /// Requests passed to `submit_purchase`, in call order.
    pub fn submitted(&self) -> Vec<PurchaseRequest> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn calls(&self) -> usize {
        lock(&self.queue).calls
    }

    pub fn verify(&self) {
        verify_queue("MockCheckout", &self.queue);
    }

    fn next(&self) -> Option<CheckoutExpectation> {
        let mut queue = lock(&self.queue);
        queue.calls += 1;
        queue.expectations.pop_front()
    }

    fn mismatch(&self, call: String, operation: Operation) -> ClientError {
        let error = ClientError::failed(operation, format!("unexpected call {call}"));
        lock(&self.queue).unexpected.push(call);
        error
    }
}

#[async_trait]
impl CheckoutApi for MockCheckout {
    async fn submit_purchase(&self, request: PurchaseRequest) -> Result<PurchaseReceipt, ClientError> {
        let call = format!("submit_purchase({} lines)", request.items.len());
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        match self.next() {
            Some(CheckoutExpectation(CheckoutCall::Submit { reply })) => reply.resolve(Operation::SubmitPurchase).await,
            _ => Err(self.mismatch(call, Operation::SubmitPurchase)),
        }
    }

    async fn get_purchase(&self, purchase_id: i64) -> Result<PurchaseReceipt, ClientError> {
        let call = format!("get_purchase({purchase_id})");
        match self.next() {
            Some(CheckoutExpectation(CheckoutCall::Get { purchase_id: expected, reply })) if expected == purchase_id => {
                reply.resolve(Operation::GetPurchase).await
            }
            _ => Err(self.mismatch(call, Operation::GetPurchase)),
        }
    }
}
