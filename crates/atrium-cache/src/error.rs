//! Cache subsystem error types.

use atrium_core::AtriumError;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised by the cache subsystem.
///
/// Corruption of a primary entry and store failures are fatal for the
/// current request and propagate to the caller. Group index corruption is
/// deliberately NOT represented here: the index is a best-effort
/// invalidation aid, so a corrupt index degrades to an empty set with a
/// logged warning instead of failing the request.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Stored bytes failed to deserialize into the expected response shape.
    #[error("Corrupt cache entry for key '{key}'")]
    Corruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("Failed to serialize value for cache key '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A store get/set/remove call failed.
    #[error("Cache store unavailable during {operation} for key '{key}': {message}")]
    Unavailable {
        operation: &'static str,
        key: String,
        message: String,
    },

    /// The store client could not be created or a connection acquired.
    #[error("Cache store connection failed: {0}")]
    Connection(String),
}

impl CacheError {
    /// Creates an `Unavailable` error annotated with the failing operation
    /// and key.
    #[must_use]
    pub fn unavailable(operation: &'static str, key: &str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            operation,
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<CacheError> for AtriumError {
    fn from(err: CacheError) -> Self {
        Self::Cache(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_carries_key_context() {
        let err = CacheError::unavailable("set", "orders:42", "connection refused");
        let message = err.to_string();
        assert!(message.contains("set"));
        assert!(message.contains("orders:42"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_converts_to_atrium_cache_error() {
        let err: AtriumError = CacheError::Connection("pool exhausted".to_string()).into();
        assert_eq!(err.error_code(), "CACHE_ERROR");
    }
}
