//! # Atrium Cache
//!
//! Distributed cache store abstraction with group-based invalidation.
//!
//! The store contract is deliberately narrow — get, set with a sliding
//! expiration, remove — and all state lives in the backing store; nothing is
//! held in process memory beyond the scope of one request. On top of it sits
//! the cache-group scheme: primary entries can be enrolled in a named group
//! whose members are invalidated together, with the group record kept alive
//! at least as long as its longest-lived member.

pub mod error;
pub mod group;
pub mod memory;
pub mod redis;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use group::{expiration_shadow_key, CacheGroups, GROUP_EXPIRATION_SUFFIX};
pub use memory::MemoryCacheStore;
pub use self::redis::RedisCacheStore;
pub use store::{CacheStore, CacheStoreExt, Lookup};
