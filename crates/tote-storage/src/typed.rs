//! Typed JSON view over a storage adapter.

use crate::adapter::{StorageAdapter, StorageResult};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe wrapper that stores values as JSON text.
///
/// # Example
///
/// ```rust,ignore
/// let storage = TypedStorage::new(MemoryStorage::new());
/// storage.set("prefs", &prefs).await?;
/// let prefs: Option<Prefs> = storage.get("prefs").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TypedStorage<S> {
    adapter: S,
}

impl<S: StorageAdapter> TypedStorage<S> {
    /// Wrap an adapter.
    pub fn new(adapter: S) -> Self {
        Self { adapter }
    }

    /// Borrow the underlying adapter.
    pub fn adapter(&self) -> &S {
        &self.adapter
    }

    /// Get and decode the value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.adapter.get(key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` and store it under `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let text = serde_json::to_string(value)?;
        self.adapter.set(key, &text).await
    }

    /// Delete `key`.
    pub async fn remove(&self, key: &str) -> StorageResult<()> {
        self.adapter.remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, StorageError};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        currency: String,
        compact: bool,
    }

    #[tokio::test]
    async fn test_typed_get_set() {
        let storage = TypedStorage::new(MemoryStorage::new());
        let prefs = Prefs {
            currency: "EUR".to_string(),
            compact: true,
        };

        storage.set("prefs", &prefs).await.unwrap();
        let loaded: Option<Prefs> = storage.get("prefs").await.unwrap();
        assert_eq!(loaded, Some(prefs));

        storage.remove("prefs").await.unwrap();
        let gone: Option<Prefs> = storage.get("prefs").await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_typed_get_reports_malformed_json() {
        let storage = TypedStorage::new(MemoryStorage::with_entry("prefs", "not json"));
        let result: StorageResult<Option<Prefs>> = storage.get("prefs").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
