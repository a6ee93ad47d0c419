use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{CartStorage, StorageError};

/// In-process slot. Clones share the same map, so a test can keep one handle
/// and hand another to the actor.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value under `key` without going through the async trait.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    /// Seeds `key` with `value`, e.g. to simulate a snapshot from an earlier session.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values().insert(key.into(), value.into());
    }

    // A poisoned map still holds consistent strings.
    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_values() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.save("@RocketShoes:cart", "[]").await.unwrap();

        assert_eq!(handle.get("@RocketShoes:cart").as_deref(), Some("[]"));
        assert!(handle.load("other").await.unwrap().is_none());
    }
}
