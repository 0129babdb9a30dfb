//! Redis-backed cache store.

use crate::error::{CacheError, CacheResult};
use crate::store::CacheStore;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::time::Duration;
use tracing::debug;

const DATA_FIELD: &str = "data";
const SLIDING_FIELD: &str = "sldexp";

/// Redis implementation of [`CacheStore`].
///
/// Redis expirations are absolute, so each entry is stored as a hash of
/// `{data, sldexp}` and the key's TTL is re-armed from `sldexp` on every
/// read, which yields sliding-expiration semantics.
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates a store with its own pool connected to `url`.
    pub fn connect(url: &str) -> CacheResult<Self> {
        let pool = deadpool_redis::Config::from_url(url)
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    async fn conn(&self) -> CacheResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut conn = self.conn().await?;

        let (data, sliding_secs): (Option<Vec<u8>>, Option<u64>) = redis::pipe()
            .hget(key, DATA_FIELD)
            .hget(key, SLIDING_FIELD)
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::unavailable("get", key, e.to_string()))?;

        let Some(data) = data else {
            return Ok(None);
        };

        // Re-arm the sliding window.
        if let Some(secs) = sliding_secs {
            let _: bool = conn
                .expire(key, secs as i64)
                .await
                .map_err(|e| CacheError::unavailable("get", key, e.to_string()))?;
        }

        Ok(Some(data))
    }

    async fn set(&self, key: &str, value: &[u8], sliding: Duration) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let sliding_secs = sliding.as_secs().max(1);

        let _: () = redis::pipe()
            .hset(key, DATA_FIELD, value)
            .hset(key, SLIDING_FIELD, sliding_secs)
            .expire(key, sliding_secs as i64)
            .query_async(&mut *conn)
            .await
            .map_err(|e| CacheError::unavailable("set", key, e.to_string()))?;

        debug!(key, sliding_secs, "Cached key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| CacheError::unavailable("remove", key, e.to_string()))?;

        let removed = deleted > 0;
        debug!(key, removed, "Removed key");
        Ok(())
    }
}
