//! Message envelope.

use crate::error::BrokerResult;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A broker message: a JSON payload with delivery metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Queue the message was published to.
    pub queue: String,
    /// JSON-encoded payload.
    pub payload: serde_json::Value,
    /// Publication instant.
    pub published_at: DateTime<Utc>,
    /// Correlation id for tracing a message across services.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl Message {
    /// Creates a message for a queue from a serializable payload.
    pub fn new<T: Serialize>(queue: &str, payload: &T) -> BrokerResult<Self> {
        Ok(Self {
            id: Uuid::now_v7().to_string(),
            queue: queue.to_string(),
            payload: serde_json::to_value(payload)?,
            published_at: Utc::now(),
            correlation_id: None,
        })
    }

    /// Sets the correlation id.
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Deserializes the payload.
    pub fn payload_as<T: DeserializeOwned>(&self) -> BrokerResult<T> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }

    /// Serializes the whole envelope.
    pub fn to_json(&self) -> BrokerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes an envelope.
    pub fn from_json(json: &str) -> BrokerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct OrderPlaced {
        order_id: u32,
        total: u64,
    }

    #[test]
    fn test_envelope_round_trip() {
        let event = OrderPlaced {
            order_id: 42,
            total: 1250,
        };
        let message = Message::new("orders", &event)
            .unwrap()
            .with_correlation_id("req-7");

        let json = message.to_json().unwrap();
        let decoded = Message::from_json(&json).unwrap();

        assert_eq!(decoded.queue, "orders");
        assert_eq!(decoded.correlation_id.as_deref(), Some("req-7"));
        assert_eq!(decoded.payload_as::<OrderPlaced>().unwrap(), event);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::new("orders", &1u32).unwrap();
        let b = Message::new("orders", &1u32).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_payload_type_mismatch_is_an_error() {
        let message = Message::new("orders", &"just a string").unwrap();
        assert!(message.payload_as::<OrderPlaced>().is_err());
    }
}
