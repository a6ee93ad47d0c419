//! Type-safe handles for talking to the cart actor.

pub mod cart_client;

pub use cart_client::*;
