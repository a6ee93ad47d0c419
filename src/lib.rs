//! # Cart Store
//!
//! > **A shopping cart as a single Tokio actor.**
//!
//! The cart is an ordered list of line items (product + quantity). Every
//! quantity change is checked against the catalog's stock endpoint, every
//! successful change is written to a durable key-value slot as a full JSON
//! snapshot, and every failure is reported to the user as a one-shot
//! notification instead of an error.
//!
//! ## 🏗️ Design
//!
//! ### One owner for the cart
//! The [`CartActor`](cart_actor::CartActor) owns the cart and processes
//! requests one at a time. Concurrent callers cannot interleave their
//! read-modify-write steps, so the durable slot always holds the last
//! committed cart.
//!
//! ### Immutable line items
//! Operations build a new [`Cart`](model::Cart) instead of editing the current
//! one. The new cart is persisted first and only then swapped in, so a
//! failed lookup or write leaves no trace.
//!
//! ### Failures become notifications
//! Out-of-stock requests get their own message; everything else (product not
//! in the cart, catalog or storage errors) gets the operation's generic
//! message. See [`notify::Notification`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - [`Product`](model::Product), [`Stock`](model::Stock), [`Cart`](model::Cart)
//! - [`cart_actor`] - the actor, its requests and errors
//! - [`clients`] - [`CartClient`](clients::CartClient), the cloneable handle callers use
//! - [`catalog`] - [`Catalog`](catalog::Catalog) trait and the `reqwest` client
//! - [`storage`] - [`CartStorage`](storage::CartStorage) trait, file and memory slots
//! - [`notify`] - notification messages and sinks
//! - [`lifecycle`] - [`CartSystem`](lifecycle::CartSystem) wiring and `tracing` setup
//! - [`config`] - environment-driven [`CartConfig`](config::CartConfig)
//! - [`mock`] - scripted catalog and storage for tests
//!
//! ## 🚀 Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cart_store::config::CartConfig;
//! use cart_store::lifecycle::{setup_tracing, CartSystem};
//! use cart_store::model::{ProductId, UpdateProductAmount};
//! use cart_store::notify::ChannelNotifier;
//!
//! setup_tracing();
//! let config = CartConfig::from_env()?;
//! let (notifier, mut notifications) = ChannelNotifier::new();
//! let system = CartSystem::from_config(&config, Arc::new(notifier))?;
//!
//! let cart = system.cart_client.clone();
//! cart.add_product(ProductId(1)).await?;
//! cart.update_product_amount(UpdateProductAmount { product_id: ProductId(1), amount: 3 }).await?;
//!
//! while let Ok(notification) = notifications.try_recv() {
//!     eprintln!("{notification}");
//! }
//! drop(cart);
//! system.shutdown().await?;
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod notify;
pub mod storage;
