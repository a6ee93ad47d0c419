//! # Observability & Tracing
//!
//! The [`setup_tracing`] function installs a `tracing-subscriber` formatter
//! for applications embedding the cart.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start (with the number of line items loaded from the slot) and shutdown
//! - **Requests**: `AddProduct`, `RemoveProduct`, `UpdateProductAmount`, `GetCart` with their `product_id` / `amount`
//! - **Commits**: distinct items and total units after every successful mutation
//! - **Failures**: the underlying [`CartError`](crate::cart_actor::CartError) and the notification shown to the user
//! - **Catalog calls**: one span per `stock` / `product` lookup with the resolved URL
//!
//! ## Usage
//!
//! ```bash
//! # Commits, failures, lifecycle
//! RUST_LOG=info
//!
//! # Every request, lookup and snapshot write
//! RUST_LOG=debug
//!
//! # Only the actor
//! RUST_LOG=cart_store::cart_actor=debug
//! ```
//!
//! With `RUST_LOG=info` a scenario that adds the same product twice and then
//! asks for more than the stock allows reads:
//!
//! ```text
//! INFO Cart actor started key=@RocketShoes:cart items=0
//! INFO Committed items=1 units=1
//! INFO Committed items=1 units=2
//! WARN Cart operation failed error=Insufficient stock for product 1: requested 10, available 5 notification=OutOfStock
//! ```

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Calling it again after a subscriber is installed has no effect.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
