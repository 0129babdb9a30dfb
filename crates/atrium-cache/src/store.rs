//! Cache store capability interface.

use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// A byte-oriented key/value store with sliding expiration.
///
/// This trait is the only contract the cache subsystem has with its backing
/// store: get, set-with-expiration, and remove, addressed by string keys.
/// An entry's sliding window is refreshed by the store on every successful
/// read or write of the key. No transactions or batch operations are
/// assumed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the raw bytes stored under `key`, refreshing its sliding
    /// window. Returns `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores `value` under `key` with the given sliding expiration.
    async fn set(&self, key: &str, value: &[u8], sliding: Duration) -> CacheResult<()>;

    /// Removes the entry stored under `key`, if any.
    async fn remove(&self, key: &str) -> CacheResult<()>;
}

/// Outcome of a typed cache lookup.
///
/// Callers pattern-match on the three cases rather than catching errors:
/// a corrupt entry is data the caller must decide about, not an exception.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The key was present and deserialized into `T`.
    Hit(T),
    /// The key was absent or expired.
    Miss,
    /// The key was present but its bytes did not deserialize into `T`.
    Corrupt(serde_json::Error),
}

impl<T> Lookup<T> {
    /// Returns `true` for a hit.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Extension trait with typed get/set over JSON payloads.
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Reads and deserializes the value stored under `key`.
    async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> CacheResult<Lookup<T>> {
        match self.get(key).await? {
            Some(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key, "Cache hit");
                    Ok(Lookup::Hit(value))
                }
                Err(source) => Ok(Lookup::Corrupt(source)),
            },
            None => {
                debug!(key, "Cache miss");
                Ok(Lookup::Miss)
            }
        }
    }

    /// Serializes and stores `value` under `key`.
    async fn put<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        sliding: Duration,
    ) -> CacheResult<()> {
        let bytes = serde_json::to_vec(value).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &bytes, sliding).await
    }
}

impl<S: CacheStore + ?Sized> CacheStoreExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCacheStore;

    #[tokio::test]
    async fn test_typed_round_trip() {
        let store = MemoryCacheStore::new();
        store
            .put("answer", &42u32, Duration::from_secs(60))
            .await
            .unwrap();

        match store.lookup::<u32>("answer").await.unwrap() {
            Lookup::Hit(value) => assert_eq!(value, 42),
            other => panic!("expected hit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_missing_key_is_miss() {
        let store = MemoryCacheStore::new();
        let lookup = store.lookup::<u32>("absent").await.unwrap();
        assert!(matches!(lookup, Lookup::Miss));
    }

    #[tokio::test]
    async fn test_lookup_garbage_is_corrupt() {
        let store = MemoryCacheStore::new();
        store
            .set("bad", b"not json at all", Duration::from_secs(60))
            .await
            .unwrap();

        let lookup = store.lookup::<u32>("bad").await.unwrap();
        assert!(matches!(lookup, Lookup::Corrupt(_)));
    }
}
