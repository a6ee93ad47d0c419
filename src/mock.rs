//! # Mocks & Testing Guide
//!
//! Test doubles for the cart's collaborators, so the real [`CartActor`]
//! can be exercised without a network or a disk.
//!
//! | Double | Stands in for | Use it to |
//! |--------|---------------|-----------|
//! | [`MockCatalog`] | [`HttpCatalog`](crate::catalog::HttpCatalog) | Script stock levels, product payloads and failures |
//! | [`MockStorage`] | [`FileStorage`](crate::storage::FileStorage) | Observe snapshots and inject write failures |
//! | [`create_mock_client`] | a running [`CartActor`] | Assert the exact requests a [`CartClient`] sends |
//!
//! ## Scripting the Catalog
//!
//! Expectations are consumed in order. A lookup that does not match the next
//! expectation panics, and [`MockCatalog::verify`] panics if any expectation
//! was left unused.
//!
//! ```rust
//! use cart_store::catalog::{Catalog, CatalogError};
//! use cart_store::mock::MockCatalog;
//! use cart_store::model::ProductId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = MockCatalog::new();
//!     catalog.expect_stock(ProductId(1)).return_ok(5);
//!     catalog
//!         .expect_stock(ProductId(2))
//!         .return_err(CatalogError::Api { status: 500, url: "/stock/2".into() });
//!
//!     assert_eq!(catalog.stock(ProductId(1)).await.unwrap().amount, 5);
//!     assert!(catalog.stock(ProductId(2)).await.is_err());
//!     catalog.verify();
//! }
//! ```
//!
//! [`CartActor`]: crate::cart_actor::CartActor
//! [`CartClient`]: crate::clients::CartClient

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};

use crate::cart_actor::CartRequest;
use crate::catalog::{Catalog, CatalogError};
use crate::clients::CartClient;
use crate::model::{Cart, CatalogProduct, ProductId, Stock, UpdateProductAmount};
use crate::storage::{CartStorage, MemoryStorage, StorageError};

// =============================================================================
// CATALOG EXPECTATIONS
// =============================================================================

/// Represents an expected catalog lookup and the response to return.
enum Expectation {
    Stock {
        id: ProductId,
        response: Result<Stock, CatalogError>,
    },
    Product {
        id: ProductId,
        response: Result<CatalogProduct, CatalogError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A scripted [`Catalog`] with expectation tracking.
///
/// Clones share the same expectation queue, so a test can hand one clone to
/// the actor and keep another to call [`verify`](Self::verify).
#[derive(Clone, Default)]
pub struct MockCatalog {
    expectations: Expectations,
}

impl MockCatalog {
    /// Creates a new mock catalog with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `stock` lookup for `id`.
    pub fn expect_stock(&self, id: ProductId) -> StockExpectationBuilder {
        StockExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `product` lookup for `id`.
    pub fn expect_product(&self, id: ProductId) -> ProductExpectationBuilder {
        ProductExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not consumed yet.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all catalog expectations were met. {remaining} remaining");
        }
    }

    fn next(&self) -> Option<Expectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        match self.next() {
            Some(Expectation::Stock { id: expected, response }) if expected == id => response,
            _ => panic!("Unexpected stock lookup for product {id}"),
        }
    }

    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        match self.next() {
            Some(Expectation::Product { id: expected, response }) if expected == id => response,
            _ => panic!("Unexpected product lookup for product {id}"),
        }
    }
}

/// Builder for `stock` expectations.
pub struct StockExpectationBuilder {
    id: ProductId,
    expectations: Expectations,
}

impl StockExpectationBuilder {
    /// Responds with `amount` units in stock.
    pub fn return_ok(self, amount: u32) {
        let id = self.id;
        self.push(Ok(Stock { id, amount }));
    }

    /// Responds with an error.
    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Stock, CatalogError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Stock {
                id: self.id,
                response,
            });
    }
}

/// Builder for `product` expectations.
pub struct ProductExpectationBuilder {
    id: ProductId,
    expectations: Expectations,
}

impl ProductExpectationBuilder {
    /// Responds with `product`.
    pub fn return_ok(self, product: CatalogProduct) {
        self.push(Ok(product));
    }

    /// Responds with an error.
    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<CatalogProduct, CatalogError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Product {
                id: self.id,
                response,
            });
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// In-memory slot whose writes can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    inner: MemoryStorage,
    fail_loads: Arc<AtomicBool>,
    fail_saves: Arc<AtomicBool>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every `load` fails with an I/O error.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// When set, every `save` fails with an I/O error and stores nothing.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The underlying map, for seeding and inspecting snapshots.
    pub fn memory(&self) -> &MemoryStorage {
        &self.inner
    }
}

#[async_trait]
impl CartStorage for MockStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("permission denied")));
        }
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("quota exceeded")));
        }
        self.inner.save(key, value).await
    }
}

// =============================================================================
// RAW CLIENT HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls instead of an actor.
///
/// Pair it with [`expect_add`], [`expect_remove`], [`expect_update`] or
/// [`expect_get_cart`] to inspect each request and answer it by hand.
pub fn create_mock_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_published, watcher) = watch::channel(Cart::new());
    (CartClient::new(sender, watcher), receiver)
}

/// Helper to verify that the next message is an AddProduct request
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(ProductId, oneshot::Sender<()>)> {
    match receiver.recv().await {
        Some(CartRequest::AddProduct {
            product_id,
            respond_to,
        }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a RemoveProduct request
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(ProductId, oneshot::Sender<()>)> {
    match receiver.recv().await {
        Some(CartRequest::RemoveProduct {
            product_id,
            respond_to,
        }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateProductAmount request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(UpdateProductAmount, oneshot::Sender<()>)> {
    match receiver.recv().await {
        Some(CartRequest::UpdateProductAmount { update, respond_to }) => Some((update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetCart request
pub async fn expect_get_cart(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<oneshot::Sender<Cart>> {
    match receiver.recv().await {
        Some(CartRequest::GetCart { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_consumes_in_order() {
        let catalog = MockCatalog::new();
        catalog.expect_stock(ProductId(1)).return_ok(2);
        catalog.expect_product(ProductId(1)).return_ok(CatalogProduct {
            id: ProductId(1),
            title: "Tênis".to_string(),
            price: 99.9,
            image: "img".to_string(),
        });

        assert_eq!(catalog.remaining(), 2);
        let stock = catalog.stock(ProductId(1)).await.unwrap();
        assert_eq!(stock, Stock { id: ProductId(1), amount: 2 });
        let product = catalog.product(ProductId(1)).await.unwrap();
        assert_eq!(product.title, "Tênis");

        catalog.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected stock lookup")]
    async fn test_mock_catalog_panics_on_mismatch() {
        let catalog = MockCatalog::new();
        catalog.expect_stock(ProductId(1)).return_ok(2);
        let _ = catalog.stock(ProductId(2)).await;
    }

    #[tokio::test]
    async fn test_mock_storage_failure_stores_nothing() {
        let storage = MockStorage::new();
        storage.set_fail_saves(true);
        assert!(storage.save("cart", "[]").await.is_err());
        assert!(storage.memory().get("cart").is_none());

        storage.set_fail_saves(false);
        storage.save("cart", "[]").await.unwrap();
        assert_eq!(storage.load("cart").await.unwrap().as_deref(), Some("[]"));
    }
}
