//! Broker error types.

use atrium_core::AtriumError;
use thiserror::Error;

/// Result type for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;

/// Message broker errors.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Redis pool error.
    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Queue does not exist or is closed.
    #[error("Queue unavailable: {0}")]
    QueueUnavailable(String),
}

impl From<BrokerError> for AtriumError {
    fn from(err: BrokerError) -> Self {
        Self::Broker(err.to_string())
    }
}
