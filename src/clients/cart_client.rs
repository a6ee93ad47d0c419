//! # Cart Client
//!
//! The interface half of the cart actor. A [`CartClient`] only holds a
//! channel sender and a watch receiver, so it is cheap to clone and can be
//! handed to every part of the UI that needs the cart.
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::cart_actor::{ActorError, CartRequest, Response};
use crate::model::{Cart, ProductId, UpdateProductAmount};

/// Client for interacting with the Cart actor.
///
/// Mutating methods resolve once the actor has finished the operation.
/// Cart-level failures (out of stock, product not in cart, catalog or
/// storage errors) are reported through the notifier and never returned
/// here; the only errors are [`ActorError`]s from a stopped actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    watcher: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, watcher: watch::Receiver<Cart>) -> Self {
        Self { sender, watcher }
    }

    /// Adds one unit of `product_id`, fetching its details on first add.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), ActorError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::AddProduct {
            product_id,
            respond_to,
        })
        .await
    }

    /// Removes the line item for `product_id`.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), ActorError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::RemoveProduct {
            product_id,
            respond_to,
        })
        .await
    }

    /// Sets the quantity of an existing line item. Non-positive amounts are ignored.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<(), ActorError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::UpdateProductAmount { update, respond_to })
            .await
    }

    /// Returns the cart as of every request sent before this one.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Cart, ActorError> {
        self.request(|respond_to| CartRequest::GetCart { respond_to })
            .await
    }

    /// Returns a receiver that sees every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.watcher.clone()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> CartRequest,
    ) -> Result<T, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{create_mock_client, expect_add, expect_get_cart, expect_update};
    use crate::model::Product;

    #[tokio::test]
    async fn test_add_product_sends_request() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move { client.add_product(ProductId(3)).await });

        let (product_id, responder) = expect_add(&mut receiver)
            .await
            .expect("Expected AddProduct request");
        assert_eq!(product_id, ProductId(3));
        responder.send(()).unwrap();

        assert!(add_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_update_passes_amount_through() {
        let (client, mut receiver) = create_mock_client(10);

        let update_task = tokio::spawn(async move {
            client
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId(2),
                    amount: -1,
                })
                .await
        });

        let (update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected UpdateProductAmount request");
        assert_eq!(update.product_id, ProductId(2));
        assert_eq!(update.amount, -1);
        responder.send(()).unwrap();

        assert!(update_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_cart_returns_actor_snapshot() {
        let (client, mut receiver) = create_mock_client(10);

        let cart_task = tokio::spawn(async move { client.cart().await });

        let responder = expect_get_cart(&mut receiver)
            .await
            .expect("Expected GetCart request");
        let cart = Cart::from(vec![Product::new(ProductId(1), "Tênis", 10.0, "img", 2)]);
        responder.send(cart.clone()).unwrap();

        assert_eq!(cart_task.await.unwrap().unwrap(), cart);
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (client, receiver) = create_mock_client(10);
        drop(receiver);

        let result = client.remove_product(ProductId(1)).await;
        assert_eq!(result, Err(ActorError::ActorClosed));
    }

    #[tokio::test]
    async fn test_dropped_responder() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move { client.add_product(ProductId(1)).await });
        let (_, responder) = expect_add(&mut receiver).await.unwrap();
        drop(responder);

        assert_eq!(add_task.await.unwrap(), Err(ActorError::ActorDropped));
    }
}
