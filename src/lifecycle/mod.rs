//! # System Lifecycle
//!
//! Starting, wiring and stopping the cart actor.
//!
//! Dependencies are injected when the actor starts running rather than when
//! it is constructed: [`CartActor::new`](crate::cart_actor::CartActor::new)
//! only creates the channel, and
//! [`CartActor::run`](crate::cart_actor::CartActor::run) receives the
//! [`CartContext`](crate::cart_actor::CartContext). [`CartSystem`] does both
//! and keeps the task handle for shutdown.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` after queued requests are processed
//! 3. **Await completion** - the task handle resolves
//!
//! Every committed cart is already in the durable slot, so shutdown has
//! nothing left to flush.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use self::tracing::*;
