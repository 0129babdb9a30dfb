//! Role-based authorization behavior.

use atrium_core::{AtriumError, AtriumResult};
use atrium_security::{roles, Claims};
use std::future::Future;
use tracing::warn;

/// Capability interface for requests that require specific roles.
pub trait SecuredRequest {
    /// Roles allowed to execute this request. The admin role always
    /// qualifies.
    fn required_roles(&self) -> Vec<String>;
}

/// Pipeline behavior that rejects requests from callers lacking the
/// required roles.
#[derive(Default)]
pub struct AuthorizationBehavior;

impl AuthorizationBehavior {
    /// Creates the behavior.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handles a request for the given caller claims.
    ///
    /// `None` claims mean the caller is not authenticated at all.
    pub async fn handle<Req, Res, F, Fut>(
        &self,
        request: &Req,
        claims: Option<&Claims>,
        next: F,
    ) -> AtriumResult<Res>
    where
        Req: SecuredRequest,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AtriumResult<Res>>,
    {
        let Some(claims) = claims else {
            return Err(AtriumError::unauthorized("You are not authenticated."));
        };

        let required = request.required_roles();
        let authorized = claims.is_admin()
            || claims
                .roles
                .iter()
                .any(|role| required.iter().any(|r| r == role));

        if !authorized {
            warn!(subject = %claims.sub, "Caller lacks required roles");
            return Err(AtriumError::forbidden("You are not authorized."));
        }

        next().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_security::TokenSubject;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    struct DeleteOrder;

    impl SecuredRequest for DeleteOrder {
        fn required_roles(&self) -> Vec<String> {
            vec!["OrderManager".to_string()]
        }
    }

    fn claims_with_roles(roles: &[&str]) -> Claims {
        let subject = TokenSubject {
            id: Uuid::new_v4(),
            name: "Alice Example".to_string(),
            email: "alice@example.com".to_string(),
            roles: roles.iter().map(ToString::to_string).collect(),
        };
        Claims::new(
            &subject,
            "atrium".to_string(),
            "atrium".to_string(),
            Utc::now() + Duration::minutes(15),
        )
    }

    #[tokio::test]
    async fn test_unauthenticated_caller_is_rejected() {
        let behavior = AuthorizationBehavior::new();
        let err = behavior
            .handle(&DeleteOrder, None, || async { Ok(()) })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_missing_role_is_forbidden() {
        let behavior = AuthorizationBehavior::new();
        let claims = claims_with_roles(&["User"]);
        let err = behavior
            .handle(&DeleteOrder, Some(&claims), || async { Ok(()) })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_matching_role_passes() {
        let behavior = AuthorizationBehavior::new();
        let claims = claims_with_roles(&["OrderManager"]);
        let result: AtriumResult<u32> = behavior
            .handle(&DeleteOrder, Some(&claims), || async { Ok(7) })
            .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_admin_always_passes() {
        let behavior = AuthorizationBehavior::new();
        let claims = claims_with_roles(&[roles::ADMIN]);
        let result: AtriumResult<u32> = behavior
            .handle(&DeleteOrder, Some(&claims), || async { Ok(7) })
            .await;
        assert_eq!(result.unwrap(), 7);
    }
}
