//! # Cart Actor
//!
//! The shopping cart as a single actor: it holds the ordered line items,
//! guards every quantity change with a stock lookup, persists a full
//! snapshot after each successful mutation, and reports failures through a
//! [`Notifier`](crate::notify::Notifier).
//!
//! ## Structure
//!
//! - [`actor`] - [`CartActor`] run loop and the three cart operations
//! - [`message`] - [`CartRequest`] sent by [`CartClient`](crate::clients::CartClient)
//! - [`error`] - [`CartError`] for operation failures, [`ActorError`] for channel failures
//! - [`new()`] - Factory function that creates the actor and client
//! - [`load_cart()`] - Startup load from the durable slot
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use cart_store::cart_actor::{self, CartContext};
//! use cart_store::mock::MockCatalog;
//! use cart_store::model::{CatalogProduct, ProductId};
//! use cart_store::notify::LogNotifier;
//! use cart_store::storage::MemoryStorage;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = MockCatalog::new();
//!     catalog.expect_stock(ProductId(1)).return_ok(3);
//!     catalog.expect_product(ProductId(1)).return_ok(CatalogProduct {
//!         id: ProductId(1),
//!         title: "Tênis de Caminhada Leve Confortável".to_string(),
//!         price: 179.9,
//!         image: "https://example.com/1.jpg".to_string(),
//!     });
//!
//!     let (actor, client) = cart_actor::new();
//!     let context = CartContext::new(
//!         Arc::new(catalog),
//!         Arc::new(MemoryStorage::new()),
//!         Arc::new(LogNotifier),
//!     );
//!     tokio::spawn(actor.run(context));
//!
//!     client.add_product(ProductId(1)).await.unwrap();
//!     assert_eq!(client.cart().await.unwrap().len(), 1);
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;

pub use actor::*;
pub use error::*;
pub use message::*;

use tracing::warn;

use crate::model::Cart;
use crate::storage::CartStorage;

/// Default capacity of the request channel.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new Cart actor and its client.
pub fn new() -> (CartActor, crate::clients::CartClient) {
    CartActor::new(DEFAULT_BUFFER_SIZE)
}

/// Reads the cart snapshot stored under `key`.
///
/// A missing slot, an unreadable slot, and a snapshot that does not parse
/// all yield an empty cart; the last two are logged.
pub async fn load_cart(storage: &dyn CartStorage, key: &str) -> Cart {
    match storage.load(key).await {
        Ok(Some(snapshot)) => match Cart::from_snapshot(&snapshot) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cart snapshot");
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "Cart slot unavailable, starting empty");
            Cart::new()
        }
    }
}
