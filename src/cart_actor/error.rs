//! Error types for the Cart actor.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::ProductId;
use crate::storage::StorageError;

/// Errors that can occur while applying a cart operation.
///
/// These never reach the caller: the actor turns them into a
/// [`Notification`](crate::notify::Notification) at the operation boundary.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The quantity cannot be represented.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// A stock or product lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The snapshot could not be written to the durable slot.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors returned by [`CartClient`](crate::clients::CartClient) when the actor
/// cannot be reached.
#[derive(Debug, Error, PartialEq)]
pub enum ActorError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
