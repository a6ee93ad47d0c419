//! The cart value: an ordered, id-unique sequence of line items.
//!
//! Every mutating helper returns a *new* [`Cart`]; the receiver is never
//! modified. The actor builds the next cart, persists it, and only then
//! swaps it in, so a failure at any step leaves the current cart intact.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Product, ProductId};

/// Reasons a stored snapshot is rejected.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Product {0} appears more than once")]
    DuplicateProduct(ProductId),

    #[error("Product {0} has amount 0")]
    ZeroAmount(ProductId),
}

/// Ordered line items, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a serialized snapshot (a JSON array of line items).
    ///
    /// A snapshot that parses but repeats a product id or holds an empty
    /// line item is rejected as well.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, SnapshotError> {
        let cart: Self = serde_json::from_str(snapshot)?;

        let mut seen = HashSet::with_capacity(cart.len());
        for product in &cart {
            if product.amount == 0 {
                return Err(SnapshotError::ZeroAmount(product.id));
            }
            if !seen.insert(product.id) {
                return Err(SnapshotError::DuplicateProduct(product.id));
            }
        }
        Ok(cart)
    }

    /// Serializes the whole cart for the durable slot.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|product| product.id == id)
    }

    /// Total units across all line items.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|product| u64::from(product.amount)).sum()
    }

    /// Sum of every line item's subtotal.
    pub fn total(&self) -> f64 {
        self.items.iter().map(Product::subtotal).sum()
    }

    /// Returns a cart containing `product`.
    ///
    /// A line item with the same id is replaced where it stands; otherwise
    /// `product` is appended.
    pub fn with_item(&self, product: Product) -> Self {
        let mut items = self.items.clone();
        match items.iter().position(|item| item.id == product.id) {
            Some(index) => items[index] = product,
            None => items.push(product),
        }
        Self { items }
    }

    /// Returns a cart where the line item for `id` holds `amount` units,
    /// or `None` if `id` is not in the cart.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Self> {
        let current = self.get(id)?;
        Some(self.with_item(current.with_amount(amount)))
    }

    /// Returns a cart without the line item for `id`, or `None` if `id` is
    /// not in the cart.
    pub fn without(&self, id: ProductId) -> Option<Self> {
        let index = self.items.iter().position(|product| product.id == id)?;
        let mut items = self.items.clone();
        items.remove(index);
        Some(Self { items })
    }
}

impl From<Vec<Product>> for Cart {
    fn from(items: Vec<Product>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
