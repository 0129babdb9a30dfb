//! # Atrium Pipeline
//!
//! Request pipeline behaviors: cross-cutting concerns that wrap a request
//! handler. A behavior is invoked with the request and a downstream
//! producer (a closure returning a future) and returns the response;
//! behaviors compose by nesting the closures.
//!
//! ```no_run
//! use std::sync::Arc;
//! use atrium_cache::MemoryCacheStore;
//! use atrium_config::CacheConfig;
//! use atrium_core::AtriumResult;
//! use atrium_pipeline::caching::{CacheableRequest, CachingBehavior};
//!
//! struct GetOrder {
//!     id: u32,
//! }
//!
//! impl CacheableRequest for GetOrder {
//!     fn cache_key(&self) -> String {
//!         format!("orders:{}", self.id)
//!     }
//!
//!     fn cache_group_key(&self) -> Option<String> {
//!         Some("orders".to_string())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> AtriumResult<()> {
//!     let caching = CachingBehavior::new(Arc::new(MemoryCacheStore::new()), CacheConfig::default());
//!
//!     let request = GetOrder { id: 42 };
//!     let total: u64 = caching.handle(&request, || async { Ok(1250) }).await?;
//!     assert_eq!(total, 1250);
//!     Ok(())
//! }
//! ```

pub mod authorization;
pub mod cache_removing;
pub mod caching;
pub mod logging;
pub mod transaction;
pub mod validation;

pub use authorization::{AuthorizationBehavior, SecuredRequest};
pub use cache_removing::{CacheEvictingRequest, CacheRemovingBehavior};
pub use caching::{CacheableRequest, CachingBehavior};
pub use logging::{LoggableRequest, LoggingBehavior};
pub use transaction::{TransactionBehavior, TransactionalRequest};
pub use validation::ValidationBehavior;
