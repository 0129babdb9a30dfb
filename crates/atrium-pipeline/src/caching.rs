//! Response caching behavior.

use atrium_cache::{CacheError, CacheGroups, CacheStore, CacheStoreExt, Lookup};
use atrium_config::CacheConfig;
use atrium_core::AtriumResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Capability interface for requests whose responses can be cached.
pub trait CacheableRequest {
    /// The key the response is cached under.
    fn cache_key(&self) -> String;

    /// When `true`, the cache is not consulted or written for this request.
    fn bypass_cache(&self) -> bool {
        false
    }

    /// Optional group the cached response belongs to, for group-based
    /// invalidation.
    fn cache_group_key(&self) -> Option<String> {
        None
    }

    /// Optional per-request sliding expiration; the configured default
    /// applies when absent.
    fn sliding_expiration(&self) -> Option<Duration> {
        None
    }
}

/// Pipeline behavior that serves responses from the cache, or executes the
/// downstream producer and caches its result.
///
/// Side effects are strictly ordered: downstream invocation (on miss), then
/// the primary entry write, then the group index update. A failure in the
/// group update surfaces to the caller rather than silently orphaning the
/// already-written primary entry.
pub struct CachingBehavior<S: CacheStore> {
    store: Arc<S>,
    config: CacheConfig,
}

impl<S: CacheStore> CachingBehavior<S> {
    /// Creates the behavior over a store and cache settings.
    #[must_use]
    pub fn new(store: Arc<S>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Handles a request, consulting the cache before the downstream
    /// producer.
    ///
    /// A corrupt cached response is fatal for the request: recomputing would
    /// mask data corruption, so the error propagates instead.
    pub async fn handle<Req, Res, F, Fut>(&self, request: &Req, next: F) -> AtriumResult<Res>
    where
        Req: CacheableRequest,
        Res: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AtriumResult<Res>>,
    {
        if !self.config.enabled || request.bypass_cache() {
            return next().await;
        }

        let key = request.cache_key();
        match self.store.lookup::<Res>(&key).await? {
            Lookup::Hit(response) => {
                info!(cache_key = %key, "Fetched from cache");
                Ok(response)
            }
            Lookup::Corrupt(source) => {
                error!(cache_key = %key, error = %source, "Corrupt cached response");
                Err(CacheError::Corruption { key, source }.into())
            }
            Lookup::Miss => self.produce_and_cache(request, &key, next).await,
        }
    }

    async fn produce_and_cache<Req, Res, F, Fut>(
        &self,
        request: &Req,
        key: &str,
        next: F,
    ) -> AtriumResult<Res>
    where
        Req: CacheableRequest,
        Res: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AtriumResult<Res>>,
    {
        let response = next().await?;

        let sliding = request
            .sliding_expiration()
            .unwrap_or_else(|| self.config.default_sliding());

        self.store.put(key, &response, sliding).await?;
        info!(
            cache_key = %key,
            sliding_secs = sliding.as_secs(),
            "Added to cache"
        );

        if let Some(group_key) = request.cache_group_key() {
            CacheGroups::new(self.store.as_ref())
                .add_member(&group_key, key, sliding)
                .await?;
        }

        Ok(response)
    }
}
