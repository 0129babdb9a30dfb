//! # Atrium Messaging
//!
//! Message broker client wrapper: a JSON message envelope, narrow
//! publisher/consumer contracts, a Redis-backed bus, and an in-memory bus
//! for tests.

pub mod bus;
pub mod error;
pub mod memory;
pub mod message;
pub mod redis;

pub use bus::{MessageConsumer, MessagePublisher, QueueKeys};
pub use error::{BrokerError, BrokerResult};
pub use memory::MemoryMessageBus;
pub use message::Message;
pub use self::redis::RedisMessageBus;
