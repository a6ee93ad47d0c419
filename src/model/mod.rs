//! Pure data structures shared by the cart actor, the catalog and the storage slot.

pub mod cart;
pub mod product;
pub mod stock;

pub use cart::*;
pub use product::*;
pub use stock::*;
