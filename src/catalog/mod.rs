//! # Catalog
//!
//! Read-only access to the remote stock and product endpoints.
//!
//! The cart actor only depends on the [`Catalog`] trait, so tests swap in
//! [`MockCatalog`](crate::mock::MockCatalog) while production wiring uses
//! [`HttpCatalog`].

pub mod error;
pub mod http;

pub use error::*;
pub use http::*;

use crate::model::{CatalogProduct, ProductId, Stock};
use async_trait::async_trait;

/// Source of stock levels and product metadata.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches the current purchasable quantity for `id`.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// Fetches display metadata (title, price, image) for `id`.
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError>;
}
