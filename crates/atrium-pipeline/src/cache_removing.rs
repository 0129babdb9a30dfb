//! Cache invalidation behavior.

use atrium_cache::{CacheGroups, CacheStore};
use atrium_core::AtriumResult;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Capability interface for mutating requests that invalidate cached
/// responses.
pub trait CacheEvictingRequest {
    /// Optional single key to remove.
    fn cache_key(&self) -> Option<String> {
        None
    }

    /// When `true`, no cache removal is performed.
    fn bypass_cache(&self) -> bool {
        false
    }

    /// Optional group whose members are all removed.
    fn cache_group_key(&self) -> Option<String> {
        None
    }
}

/// Pipeline behavior that removes cache entries after the downstream
/// handler has run, so invalidation reflects post-mutation state.
///
/// Deletion failures propagate: a failed invalidation would leave stale
/// data visible to future reads, so it must not silently no-op.
pub struct CacheRemovingBehavior<S: CacheStore> {
    store: Arc<S>,
}

impl<S: CacheStore> CacheRemovingBehavior<S> {
    /// Creates the behavior over a store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Handles a request, then removes the group (if any) and the single
    /// key (if any), in that order.
    pub async fn handle<Req, Res, F, Fut>(&self, request: &Req, next: F) -> AtriumResult<Res>
    where
        Req: CacheEvictingRequest,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AtriumResult<Res>>,
    {
        if request.bypass_cache() {
            debug!("Bypassing cache removal");
            return next().await;
        }

        let response = next().await?;

        if let Some(group_key) = request.cache_group_key() {
            CacheGroups::new(self.store.as_ref())
                .invalidate(&group_key)
                .await?;
        }

        if let Some(key) = request.cache_key() {
            self.store.remove(&key).await?;
            info!(cache_key = %key, "Removed cache entry");
        }

        Ok(response)
    }
}
