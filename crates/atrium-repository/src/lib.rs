//! # Atrium Repository
//!
//! Persistence contracts for Atrium: entity and timestamp traits, a
//! soft-deleting asynchronous repository contract with an in-memory
//! reference implementation, and the database connection pool wrapper.

pub mod entity;
pub mod memory;
pub mod pool;
pub mod repository;

pub use entity::{Entity, EntityTimestamps, SoftDelete};
pub use memory::MemoryRepository;
pub use pool::DatabasePool;
pub use repository::AsyncRepository;
