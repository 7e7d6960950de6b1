//! File-backed session storage.
//!
//! Mirrors the web client's `localStorage` layout in a single JSON object
//! file for desktop and test builds. Every mutation rewrites the whole map
//! through a temp-file rename so a crash mid-write cannot leave a torn
//! file behind.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use exjobnet_application::ports::{SessionStorage, StorageError};

/// [`SessionStorage`] over one JSON object file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates a storage over the given file path. The file and its parent
    /// directory are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::debug!(path = %self.path.display(), error = %err, "session file unreadable");
            StorageError::Corrupted(err.to_string())
        })
    }

    async fn save(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::Io(err.to_string()))?;
        }

        let bytes = serde_json::to_vec_pretty(map)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load().await?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.save(&map).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }
}
