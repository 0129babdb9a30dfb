//! Request validation behavior.

use atrium_core::{validation_errors_to_atrium_error, validation_errors_to_field_errors, AtriumResult};
use std::future::Future;
use tracing::warn;
use validator::Validate;

/// Pipeline behavior that validates requests before they reach a handler.
///
/// Invalid requests never invoke the downstream producer; all field
/// failures are aggregated into a single validation error.
#[derive(Default)]
pub struct ValidationBehavior;

impl ValidationBehavior {
    /// Creates the behavior.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validates the request, then invokes the downstream producer.
    pub async fn handle<Req, Res, F, Fut>(&self, request: &Req, next: F) -> AtriumResult<Res>
    where
        Req: Validate,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AtriumResult<Res>>,
    {
        if let Err(errors) = request.validate() {
            let fields = validation_errors_to_field_errors(&errors);
            warn!(failures = fields.len(), "Request validation failed");
            return Err(validation_errors_to_atrium_error(errors));
        }

        next().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct RegisterUser {
        #[validate(length(min = 3))]
        username: String,
        #[validate(email)]
        email: String,
    }

    #[tokio::test]
    async fn test_valid_request_reaches_downstream() {
        let behavior = ValidationBehavior::new();
        let request = RegisterUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };

        let result: AtriumResult<&str> = behavior.handle(&request, || async { Ok("ok") }).await;
        assert_eq!(result.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_downstream() {
        let behavior = ValidationBehavior::new();
        let request = RegisterUser {
            username: "a".to_string(),
            email: "nope".to_string(),
        };

        let result: AtriumResult<&str> = behavior
            .handle(&request, || async {
                panic!("downstream must not run for invalid requests")
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("username"));
        assert!(err.to_string().contains("email"));
    }
}
