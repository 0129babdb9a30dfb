//! Request logging behavior.

use atrium_core::AtriumResult;
use serde::Serialize;
use std::future::Future;
use tracing::{info, warn};

/// Marker for requests whose parameters should be logged.
///
/// The request itself is serialized into the log record, so implementors
/// must not carry secrets in loggable fields.
pub trait LoggableRequest: Serialize {}

#[derive(Serialize)]
struct LogDetail<'a, R: Serialize> {
    request: &'static str,
    user: &'a str,
    parameters: &'a R,
}

/// Pipeline behavior that logs the request and its caller before
/// delegating downstream.
#[derive(Default)]
pub struct LoggingBehavior;

impl LoggingBehavior {
    /// Creates the behavior.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Logs the request, then invokes the downstream producer.
    pub async fn handle<Req, Res, F, Fut>(
        &self,
        request: &Req,
        user: Option<&str>,
        next: F,
    ) -> AtriumResult<Res>
    where
        Req: LoggableRequest,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AtriumResult<Res>>,
    {
        let detail = LogDetail {
            request: std::any::type_name::<Req>(),
            user: user.unwrap_or("UnknownUser"),
            parameters: request,
        };

        match serde_json::to_string(&detail) {
            Ok(json) => info!(target: "requests", detail = %json, "Handling request"),
            Err(e) => warn!(target: "requests", error = %e, "Failed to serialize request for logging"),
        }

        next().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct CreateOrder {
        customer: String,
        total: u64,
    }

    impl LoggableRequest for CreateOrder {}

    #[tokio::test]
    async fn test_downstream_response_is_returned_unchanged() {
        let behavior = LoggingBehavior::new();
        let request = CreateOrder {
            customer: "acme".to_string(),
            total: 99,
        };

        let result: AtriumResult<&str> = behavior
            .handle(&request, Some("alice"), || async { Ok("created") })
            .await;
        assert_eq!(result.unwrap(), "created");
    }

    #[tokio::test]
    async fn test_downstream_error_propagates() {
        let behavior = LoggingBehavior::new();
        let request = CreateOrder {
            customer: "acme".to_string(),
            total: 99,
        };

        let result: AtriumResult<()> = behavior
            .handle(&request, None, || async {
                Err(atrium_core::AtriumError::validation("bad total"))
            })
            .await;
        assert!(result.is_err());
    }
}
