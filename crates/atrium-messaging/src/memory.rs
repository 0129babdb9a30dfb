//! In-process message bus.

use crate::bus::{MessageConsumer, MessagePublisher};
use crate::error::BrokerResult;
use crate::message::Message;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// In-memory [`MessagePublisher`]/[`MessageConsumer`] for tests.
///
/// Consuming never blocks: an empty queue returns `None` immediately.
#[derive(Default)]
pub struct MemoryMessageBus {
    queues: Mutex<HashMap<String, VecDeque<Message>>>,
}

impl MemoryMessageBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending messages in a queue.
    #[must_use]
    pub fn pending(&self, queue: &str) -> usize {
        self.queues
            .lock()
            .get(queue)
            .map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl MessagePublisher for MemoryMessageBus {
    async fn publish(&self, message: &Message) -> BrokerResult<()> {
        self.queues
            .lock()
            .entry(message.queue.clone())
            .or_default()
            .push_back(message.clone());
        Ok(())
    }
}

#[async_trait]
impl MessageConsumer for MemoryMessageBus {
    async fn consume(&self, queue: &str) -> BrokerResult<Option<Message>> {
        Ok(self
            .queues
            .lock()
            .get_mut(queue)
            .and_then(VecDeque::pop_front))
    }
}
