//! In-memory session storage.

use std::collections::HashMap;

use async_trait::async_trait;
use exjobnet_application::ports::{SessionStorage, StorageError};
use tokio::sync::RwLock;

/// [`SessionStorage`] held entirely in memory.
///
/// Nothing survives a restart; useful for tests and for embedders that
/// intentionally want per-launch sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.map.write().await.clear();
        Ok(())
    }
}
