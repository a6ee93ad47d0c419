//! # Cart Actor
//!
//! The server half of the cart. It owns the current [`Cart`] and the
//! receiver end of the request channel, and processes one request at a
//! time. Two operations sent concurrently from different clients therefore
//! never interleave their read-modify-write steps.
//!
//! Every mutation follows the same sequence:
//!
//! 1. Build the next cart from the current one (line items are never
//!    modified in place).
//! 2. Persist the next cart to the durable slot.
//! 3. Swap it in and publish it to subscribers.
//!
//! A failure at step 1 or 2 leaves the current cart untouched and is turned
//! into a [`Notification`] for the user.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::error::CartError;
use super::message::CartRequest;
use crate::catalog::{Catalog, CatalogError};
use crate::clients::CartClient;
use crate::model::{Cart, Product, ProductId, UpdateProductAmount};
use crate::notify::{Notification, Notifier};
use crate::storage::{CartStorage, StorageError, DEFAULT_CART_KEY};

/// Dependencies injected into the actor when it starts running.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn Catalog>,
    pub storage: Arc<dyn CartStorage>,
    pub notifier: Arc<dyn Notifier>,
    /// Key of the durable slot holding the snapshot.
    pub storage_key: String,
}

impl CartContext {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            storage,
            notifier,
            storage_key: DEFAULT_CART_KEY.to_string(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

/// The actor that owns the cart.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    published: watch::Sender<Cart>,
}

impl CartActor {
    /// Creates a new `CartActor` and its associated `CartClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full,
    ///   client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (published, watcher) = watch::channel(Cart::new());
        let actor = Self {
            receiver,
            cart: Cart::new(),
            published,
        };
        (actor, CartClient::new(sender, watcher))
    }

    /// Loads the cart from the durable slot, then processes requests until
    /// every client has been dropped.
    pub async fn run(mut self, context: CartContext) {
        self.cart = super::load_cart(context.storage.as_ref(), &context.storage_key).await;
        self.published.send_replace(self.cart.clone());
        info!(
            key = %context.storage_key,
            items = self.cart.len(),
            "Cart actor started"
        );

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct {
                    product_id,
                    respond_to,
                } => {
                    debug!(%product_id, "AddProduct");
                    let result = self.add_product(&context, product_id).await.map(Some);
                    self.finish(&context, result, Notification::AddProductFailed);
                    let _ = respond_to.send(());
                }
                CartRequest::RemoveProduct {
                    product_id,
                    respond_to,
                } => {
                    debug!(%product_id, "RemoveProduct");
                    let result = self.remove_product(&context, product_id).await.map(Some);
                    self.finish(&context, result, Notification::RemoveProductFailed);
                    let _ = respond_to.send(());
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    debug!(product_id = %update.product_id, amount = update.amount, "UpdateProductAmount");
                    let result = self.update_product_amount(&context, update).await;
                    self.finish(&context, result, Notification::UpdateAmountFailed);
                    let _ = respond_to.send(());
                }
                CartRequest::GetCart { respond_to } => {
                    debug!(items = self.cart.len(), "GetCart");
                    let _ = respond_to.send(self.cart.clone());
                }
            }
        }

        info!(items = self.cart.len(), "Shutdown");
    }

    /// Commits a persisted cart, or reports the failure.
    ///
    /// `Ok(None)` means the operation was a deliberate no-op.
    fn finish(
        &mut self,
        context: &CartContext,
        result: Result<Option<Cart>, CartError>,
        failure: Notification,
    ) {
        match result {
            Ok(Some(next)) => {
                self.cart = next;
                self.published.send_replace(self.cart.clone());
                info!(
                    items = self.cart.len(),
                    units = self.cart.item_count(),
                    "Committed"
                );
            }
            Ok(None) => {}
            Err(e) => {
                let notification = match &e {
                    CartError::OutOfStock { .. } => Notification::OutOfStock,
                    _ => failure,
                };
                warn!(error = %e, ?notification, "Cart operation failed");
                context.notifier.notify(notification);
            }
        }
    }

    async fn add_product(
        &self,
        context: &CartContext,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        let current = self.cart.get(product_id).map_or(0, |product| product.amount);
        let stock = context.catalog.stock(product_id).await?;
        let requested = match current.checked_add(1) {
            Some(requested) if requested <= stock.amount => requested,
            _ => {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: current.saturating_add(1),
                    available: stock.amount,
                })
            }
        };

        let next = match self.cart.with_amount(product_id, requested) {
            Some(next) => next,
            None => {
                let product = context.catalog.product(product_id).await?;
                if product.id != product_id {
                    return Err(CatalogError::Parse(format!(
                        "product endpoint returned id {} for {}",
                        product.id, product_id
                    ))
                    .into());
                }
                self.cart.with_item(Product::from(product))
            }
        };

        persist(context, &next).await?;
        Ok(next)
    }

    async fn remove_product(
        &self,
        context: &CartContext,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        let next = self
            .cart
            .without(product_id)
            .ok_or(CartError::NotFound(product_id))?;

        persist(context, &next).await?;
        Ok(next)
    }

    async fn update_product_amount(
        &self,
        context: &CartContext,
        update: UpdateProductAmount,
    ) -> Result<Option<Cart>, CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount <= 0 {
            debug!(%product_id, amount, "Ignoring non-positive amount");
            return Ok(None);
        }

        let stock = context.catalog.stock(product_id).await?;
        if amount > i64::from(stock.amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: u32::try_from(amount).unwrap_or(u32::MAX),
                available: stock.amount,
            });
        }

        let requested = u32::try_from(amount).map_err(|_| CartError::QuantityOverflow(product_id))?;
        let next = self
            .cart
            .with_amount(product_id, requested)
            .ok_or(CartError::NotFound(product_id))?;

        persist(context, &next).await?;
        Ok(Some(next))
    }
}

/// Overwrites the durable slot with the full snapshot of `cart`.
async fn persist(context: &CartContext, cart: &Cart) -> Result<(), CartError> {
    let snapshot = cart.to_snapshot().map_err(StorageError::from)?;
    context
        .storage
        .save(&context.storage_key, &snapshot)
        .await?;
    debug!(key = %context.storage_key, items = cart.len(), "Persisted");
    Ok(())
}
