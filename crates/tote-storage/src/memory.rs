//! In-memory storage adapter.

use crate::adapter::{StorageAdapter, StorageResult};
use crate::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage adapter backed by a shared `HashMap`.
///
/// Clones share the same map, so a test can hand one clone to a store and
/// inspect the other. Writes can be made to fail on demand to exercise
/// error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(entries),
                ..Inner::default()
            }),
        }
    }

    /// Make subsequent `set`/`remove` calls fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.inner.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.inner
            .entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.inner.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", "v1").await.unwrap();
        storage.set("k", "v2").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.write_count(), 2);

        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = MemoryStorage::with_entry("k", "v");
        let other = storage.clone();
        other.set("k2", "v2").await.unwrap();

        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(storage.get("k2").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_fail_writes() {
        let storage = MemoryStorage::with_entry("k", "v");
        storage.set_fail_writes(true);

        assert!(matches!(
            storage.set("k", "other").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.remove("k").await.is_err());
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));

        storage.set_fail_writes(false);
        storage.set("k", "other").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("other"));
    }
}
