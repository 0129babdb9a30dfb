//! In-process cache store.

use crate::error::CacheResult;
use crate::store::CacheStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct Entry {
    value: Vec<u8>,
    sliding: Duration,
    expires_at: Instant,
}

/// In-memory cache store with sliding expiration.
///
/// Expired entries are dropped lazily on access. Primarily the substitution
/// point for tests, but also usable as a single-process store.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Returns `true` when the store holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        let expired = matches!(entries.get(key), Some(entry) if entry.expires_at <= now);
        if expired {
            entries.remove(key);
            return Ok(None);
        }

        match entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = now + entry.sliding;
                Ok(Some(entry.value.clone()))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], sliding: Duration) -> CacheResult<()> {
        let entry = Entry {
            value: value.to_vec(),
            sliding,
            expires_at: Instant::now() + sliding,
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryCacheStore::new();
        store.set("k", b"v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_entry_expires_when_untouched() {
        let store = MemoryCacheStore::new();
        store.set("k", b"v", Duration::from_millis(30)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_access_refreshes_sliding_window() {
        let store = MemoryCacheStore::new();
        store.set("k", b"v", Duration::from_millis(100)).await.unwrap();

        // Keep touching the key past its original window.
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
        }
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value_and_window() {
        let store = MemoryCacheStore::new();
        store.set("k", b"old", Duration::from_secs(60)).await.unwrap();
        store.set("k", b"new", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }
}
