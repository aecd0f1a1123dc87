//! Cart store error types.

use thiserror::Error;
use tote_storage::StorageError;

/// Errors reported by the cart store.
///
/// Mutations never return these; they surface from rehydration
/// diagnostics, [`flush`](crate::CartStore::flush), storage maintenance
/// and configuration loading.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage adapter failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Envelope could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted envelope was written by a newer build.
    #[error("Unsupported persisted cart version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The most recent background write failed.
    #[error("Persisted write failed: {0}")]
    WriteFailed(String),

    /// The cart kept changing while it was being reloaded.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    /// The background writer is no longer running.
    #[error("Background writer stopped")]
    WriterStopped,

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
