//! Durable session storage port

use async_trait::async_trait;
use exjobnet_domain::AuthError;
use thiserror::Error;

/// Errors from the durable storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The underlying medium could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// A value could not be serialized for storage.
    #[error("storage serialization error: {0}")]
    Serialization(String),

    /// Stored content exists but cannot be decoded.
    #[error("storage corrupted: {0}")]
    Corrupted(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        Self::StorageCorrupted {
            message: err.to_string(),
        }
    }
}

/// Port for the durable key/value store backing the session.
///
/// The web client backs this with `localStorage`; adapters here may be
/// file-backed or in-memory. Only the session store writes through this
/// port - every other component reads the store's in-memory mirror.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value, `None` when the key is absent.
    ///
    /// # Errors
    /// `Io` or `Corrupted` when the medium cannot be read back.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value.
    ///
    /// # Errors
    /// `Io` or `Serialization` when the write fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key; removing an absent key is not an error.
    ///
    /// # Errors
    /// `Io` when the write fails.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every key.
    ///
    /// # Errors
    /// `Io` when the write fails.
    async fn clear(&self) -> Result<(), StorageError>;
}
