//! Storage error types.

use thiserror::Error;

/// Errors that can occur when talking to a storage adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store rejected or could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Key cannot be used with this adapter.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}
