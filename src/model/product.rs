//! Line items held by the cart and the catalog payload they are built from.
//!
//! A [`Product`] is an immutable value: changing a quantity goes through
//! [`Product::with_amount`], which returns a new line item and leaves the
//! original untouched.

use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for catalog products.
///
/// Serialized as a bare integer so snapshots keep the `{"id": 1, ...}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as served by the catalog's product endpoint.
///
/// Fields the cart does not track are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// One line of the cart: a catalog product plus the quantity being bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl Product {
    /// Creates a new line item.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `title` - Display name
    /// * `price` - Unit price
    /// * `image` - Image URL
    /// * `amount` - Quantity in the cart (at least 1)
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        amount: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount,
        }
    }

    /// Returns a copy of this line item holding `amount` units.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

impl From<CatalogProduct> for Product {
    /// A freshly added product always enters the cart with a single unit.
    fn from(product: CatalogProduct) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }
}

/// Target quantity for an existing line item.
///
/// `amount` is signed: zero or negative values come from decrementing past
/// one and are ignored by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}
