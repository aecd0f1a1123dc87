//! The storage adapter seam.

use crate::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Asynchronous key-value store holding UTF-8 strings.
///
/// Values are opaque to the adapter. Every operation may fail
/// transiently; callers decide whether a failure matters.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value in full.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

#[async_trait]
impl<S: StorageAdapter + ?Sized> StorageAdapter for Arc<S> {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key).await
    }
}
