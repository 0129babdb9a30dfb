//! Redis-backed message bus.

use crate::bus::{MessageConsumer, MessagePublisher, QueueKeys};
use crate::error::{BrokerError, BrokerResult};
use crate::message::Message;
use async_trait::async_trait;
use atrium_config::{BrokerConfig, RedisConfig};
use deadpool_redis::{redis::AsyncCommands, Pool, Runtime};
use tracing::{debug, info};

/// Message bus over Redis lists: `LPUSH` to publish, blocking `BRPOP` to
/// consume, so each message is delivered to exactly one consumer.
pub struct RedisMessageBus {
    pool: Pool,
    keys: QueueKeys,
    poll_timeout_secs: u64,
}

impl RedisMessageBus {
    /// Creates a bus over an existing pool.
    #[must_use]
    pub fn new(pool: Pool, config: &BrokerConfig) -> Self {
        Self {
            pool,
            keys: QueueKeys::new(&config.queue_prefix),
            poll_timeout_secs: config.poll_timeout_secs,
        }
    }

    /// Creates a bus with its own connection pool.
    pub fn connect(redis: &RedisConfig, config: &BrokerConfig) -> BrokerResult<Self> {
        info!("Creating Redis connection pool for message bus...");

        let pool = deadpool_redis::Config::from_url(&redis.url)
            .builder()
            .map_err(|e| BrokerError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(redis.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| BrokerError::Configuration(format!("Failed to create pool: {}", e)))?;

        Ok(Self::new(pool, config))
    }

    async fn conn(&self) -> BrokerResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl MessagePublisher for RedisMessageBus {
    async fn publish(&self, message: &Message) -> BrokerResult<()> {
        let json = message.to_json()?;
        let key = self.keys.queue(&message.queue);

        let mut conn = self.conn().await?;
        let _: i64 = conn.lpush(&key, &json).await?;

        debug!(message_id = %message.id, queue = %message.queue, "Published message");
        Ok(())
    }
}

#[async_trait]
impl MessageConsumer for RedisMessageBus {
    async fn consume(&self, queue: &str) -> BrokerResult<Option<Message>> {
        let key = self.keys.queue(queue);

        let mut conn = self.conn().await?;
        let popped: Option<(String, String)> = conn
            .brpop(&key, self.poll_timeout_secs as f64)
            .await?;

        match popped {
            Some((_, json)) => {
                let message = Message::from_json(&json)?;
                debug!(message_id = %message.id, queue, "Consumed message");
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }
}
