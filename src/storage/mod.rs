//! # Durable Slot
//!
//! String-keyed persistent storage for cart snapshots.
//!
//! The slot stores raw text; serialization of the cart is the caller's job
//! (see [`Cart::to_snapshot`](crate::model::Cart::to_snapshot)). Every save
//! is an unconditional overwrite of the whole value under the key.
//!
//! - [`FileStorage`] keeps one file per key and survives process restarts.
//! - [`MemoryStorage`] keeps values in a shared in-process map.

pub mod file;
pub mod memory;

pub use file::*;
pub use memory::*;

use async_trait::async_trait;
use thiserror::Error;

/// Default key the cart snapshot is stored under.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A key-value slot holding serialized text.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing was saved yet.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value stored under `key`.
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
