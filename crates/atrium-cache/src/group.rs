//! Group-based cache invalidation.
//!
//! A cache group associates a set of primary cache keys with a single group
//! key so they can be invalidated together. Two entries exist per group in
//! the backing store:
//!
//! - the group index: the set of member keys, stored under the group key;
//! - the expiration shadow: the widest sliding expiration, in seconds, any
//!   member has requested, stored under `{group_key}SlidingExpiration`.
//!
//! Both entries are written with a sliding window equal to the shadow value,
//! so a group's invalidation record lives at least as long as its
//! longest-lived member. Members that expire on their own leave stale keys
//! in the index; those are tolerated and only swept during invalidation.

use crate::error::CacheResult;
use crate::store::{CacheStore, CacheStoreExt, Lookup};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Suffix appended to a group key to form its expiration shadow key.
///
/// Part of the persisted key layout; changing it orphans existing shadow
/// entries.
pub const GROUP_EXPIRATION_SUFFIX: &str = "SlidingExpiration";

/// Returns the shadow key tracking a group's sliding expiration.
#[must_use]
pub fn expiration_shadow_key(group_key: &str) -> String {
    format!("{group_key}{GROUP_EXPIRATION_SUFFIX}")
}

/// Group membership operations over a [`CacheStore`].
pub struct CacheGroups<'a, S: CacheStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: CacheStore + ?Sized> CacheGroups<'a, S> {
    /// Creates a view over the given store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Adds `member_key` to the group, widening the group's sliding window
    /// to at least `sliding`.
    ///
    /// Membership is idempotent. The group window only ever widens
    /// (`max(prior, sliding)`); it resets when the shadow entry itself
    /// expires or is removed. A corrupt index is replaced by a fresh set
    /// containing only the new member — group membership is a best-effort
    /// invalidation aid, so this degrades with a warning instead of failing
    /// the request.
    ///
    /// The read-modify-write across the shadow and index is not atomic:
    /// concurrent writers to the same group can lose a membership update.
    /// Single-key store writes stay atomic, so served data is unaffected;
    /// only invalidation completeness can lag a cycle.
    ///
    /// Returns the effective window applied to both entries.
    pub async fn add_member(
        &self,
        group_key: &str,
        member_key: &str,
        sliding: Duration,
    ) -> CacheResult<Duration> {
        let shadow_key = expiration_shadow_key(group_key);

        let prior_max = match self.store.lookup::<u64>(&shadow_key).await? {
            Lookup::Hit(secs) => secs,
            Lookup::Miss => 0,
            Lookup::Corrupt(e) => {
                warn!(
                    group_key,
                    error = %e,
                    "Failed to deserialize group expiration shadow; treating as absent"
                );
                0
            }
        };
        let new_max = prior_max.max(sliding.as_secs());

        let mut members = match self.store.lookup::<HashSet<String>>(group_key).await? {
            Lookup::Hit(members) => members,
            Lookup::Miss => HashSet::new(),
            Lookup::Corrupt(e) => {
                warn!(
                    group_key,
                    error = %e,
                    "Failed to deserialize cache group; starting a new group"
                );
                HashSet::new()
            }
        };
        members.insert(member_key.to_string());

        let window = Duration::from_secs(new_max);
        self.store.put(group_key, &members, window).await?;
        self.store.put(&shadow_key, &new_max, window).await?;

        debug!(
            group_key,
            member_key,
            sliding_secs = new_max,
            members = members.len(),
            "Added cache key to group"
        );

        Ok(window)
    }

    /// Removes every member of the group, then the group index, then the
    /// expiration shadow, in that order.
    ///
    /// Members go first so a concurrent reader never finds a member through
    /// an index that has already been torn down; a miss on a half-removed
    /// group just triggers recomputation. An absent index means there is
    /// nothing to do; a corrupt index is logged and left to expire on its
    /// own. Neither case fails the request.
    ///
    /// Returns the number of member keys swept (including any that had
    /// already expired on their own).
    pub async fn invalidate(&self, group_key: &str) -> CacheResult<usize> {
        match self.store.lookup::<HashSet<String>>(group_key).await? {
            Lookup::Hit(members) => {
                for key in &members {
                    self.store.remove(key).await?;
                    debug!(key = %key, "Removed cache entry");
                }

                self.store.remove(group_key).await?;
                self.store.remove(&expiration_shadow_key(group_key)).await?;

                info!(group_key, removed = members.len(), "Removed cache group");
                Ok(members.len())
            }
            Lookup::Miss => {
                info!(group_key, "No cache group found; skipping group removal");
                Ok(0)
            }
            Lookup::Corrupt(e) => {
                warn!(
                    group_key,
                    error = %e,
                    "Failed to deserialize cache group; skipping group removal"
                );
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCacheStore;

    fn groups(store: &MemoryCacheStore) -> CacheGroups<'_, MemoryCacheStore> {
        CacheGroups::new(store)
    }

    async fn members_of(store: &MemoryCacheStore, group_key: &str) -> HashSet<String> {
        match store.lookup::<HashSet<String>>(group_key).await.unwrap() {
            Lookup::Hit(members) => members,
            other => panic!("expected group index, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_membership_is_idempotent() {
        let store = MemoryCacheStore::new();
        let groups = groups(&store);

        groups
            .add_member("orders", "orders:42", Duration::from_secs(60))
            .await
            .unwrap();
        groups
            .add_member("orders", "orders:42", Duration::from_secs(60))
            .await
            .unwrap();

        let members = members_of(&store, "orders").await;
        assert_eq!(members.len(), 1);
        assert!(members.contains("orders:42"));
    }

    #[tokio::test]
    async fn test_shadow_widens_monotonically() {
        let store = MemoryCacheStore::new();
        let groups = groups(&store);

        for secs in [30u64, 90, 60] {
            groups
                .add_member("orders", &format!("orders:{secs}"), Duration::from_secs(secs))
                .await
                .unwrap();
        }

        let shadow = store
            .lookup::<u64>(&expiration_shadow_key("orders"))
            .await
            .unwrap();
        match shadow {
            Lookup::Hit(secs) => assert_eq!(secs, 90),
            other => panic!("expected shadow value, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_member_returns_widened_window() {
        let store = MemoryCacheStore::new();
        let groups = groups(&store);

        let first = groups
            .add_member("orders", "orders:1", Duration::from_secs(120))
            .await
            .unwrap();
        assert_eq!(first, Duration::from_secs(120));

        // A narrower member does not shrink the group window.
        let second = groups
            .add_member("orders", "orders:2", Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(second, Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_corrupt_index_starts_fresh_group() {
        let store = MemoryCacheStore::new();
        store
            .set("orders", b"{ definitely not a set", Duration::from_secs(60))
            .await
            .unwrap();

        groups(&store)
            .add_member("orders", "orders:7", Duration::from_secs(60))
            .await
            .unwrap();

        let members = members_of(&store, "orders").await;
        assert_eq!(members.len(), 1);
        assert!(members.contains("orders:7"));
    }

    #[tokio::test]
    async fn test_corrupt_shadow_treated_as_absent() {
        let store = MemoryCacheStore::new();
        let shadow_key = expiration_shadow_key("orders");
        store
            .set(&shadow_key, b"not a number", Duration::from_secs(60))
            .await
            .unwrap();

        let window = groups(&store)
            .add_member("orders", "orders:1", Duration::from_secs(45))
            .await
            .unwrap();
        assert_eq!(window, Duration::from_secs(45));

        match store.lookup::<u64>(&shadow_key).await.unwrap() {
            Lookup::Hit(secs) => assert_eq!(secs, 45),
            other => panic!("expected repaired shadow, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalidate_removes_members_index_and_shadow() {
        let store = MemoryCacheStore::new();
        let groups = groups(&store);
        let window = Duration::from_secs(60);

        for key in ["orders:1", "orders:2", "orders:3"] {
            store.put(key, &"payload", window).await.unwrap();
            groups.add_member("orders", key, window).await.unwrap();
        }

        let removed = groups.invalidate("orders").await.unwrap();
        assert_eq!(removed, 3);

        for key in ["orders:1", "orders:2", "orders:3", "orders"] {
            assert_eq!(store.get(key).await.unwrap(), None, "{key} should be gone");
        }
        assert_eq!(
            store.get(&expiration_shadow_key("orders")).await.unwrap(),
            None
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_missing_group_is_noop() {
        let store = MemoryCacheStore::new();
        let removed = groups(&store).invalidate("orders").await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_invalidate_corrupt_group_skips_sweep() {
        let store = MemoryCacheStore::new();
        store
            .set("orders", b"garbage", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .put("orders:1", &"payload", Duration::from_secs(60))
            .await
            .unwrap();

        let removed = groups(&store).invalidate("orders").await.unwrap();
        assert_eq!(removed, 0);

        // Unrelated entries are untouched; the corrupt blob is left to expire.
        assert!(store.get("orders:1").await.unwrap().is_some());
        assert!(store.get("orders").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stale_member_tolerated_during_invalidation() {
        let store = MemoryCacheStore::new();
        let groups = groups(&store);
        let window = Duration::from_secs(60);

        store.put("orders:1", &"payload", window).await.unwrap();
        groups.add_member("orders", "orders:1", window).await.unwrap();
        groups.add_member("orders", "orders:2", window).await.unwrap();

        // "orders:2" was never stored (or expired on its own); removal of a
        // missing member is a no-op, not an error.
        let removed = groups.invalidate("orders").await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.is_empty());
    }
}
