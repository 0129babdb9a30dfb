//! Publisher and consumer contracts.

use crate::error::BrokerResult;
use crate::message::Message;
use async_trait::async_trait;

/// Publishes messages to named queues.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publishes a message to its queue.
    async fn publish(&self, message: &Message) -> BrokerResult<()>;
}

/// Consumes messages from named queues.
#[async_trait]
pub trait MessageConsumer: Send + Sync {
    /// Takes the next message from a queue, waiting up to the configured
    /// poll timeout. Returns `None` when no message arrived in time.
    async fn consume(&self, queue: &str) -> BrokerResult<Option<Message>>;
}

/// Key builder for broker queues.
pub struct QueueKeys {
    prefix: String,
}

impl QueueKeys {
    /// Creates a key builder with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Storage key for a queue.
    #[must_use]
    pub fn queue(&self, queue_name: &str) -> String {
        format!("{}:{}", self.prefix, queue_name)
    }
}
