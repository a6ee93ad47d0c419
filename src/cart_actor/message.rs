//! Requests the [`CartClient`](crate::clients::CartClient) sends to the
//! [`CartActor`](super::CartActor).

use tokio::sync::oneshot;

use crate::model::{Cart, ProductId, UpdateProductAmount};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// One cart operation.
///
/// Mutating requests answer with `()` once the operation has finished,
/// whether it succeeded or was reported through a notification.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: Response<()>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: Response<()>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: Response<()>,
    },
    GetCart {
        respond_to: Response<Cart>,
    },
}
