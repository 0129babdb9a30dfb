//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The subject a token is issued for.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    /// Subject's unique id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Operation claims granted to the subject.
    pub roles: Vec<String>,
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Operation claims granted to the subject.
    pub roles: Vec<String>,

    /// Issued at timestamp.
    pub iat: i64,

    /// Not before timestamp.
    pub nbf: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// JWT ID (unique identifier for this token).
    pub jti: String,
}

impl Claims {
    /// Creates claims for a subject.
    #[must_use]
    pub fn new(
        subject: &TokenSubject,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.id.to_string(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            roles: subject.roles.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Returns the subject id, if it parses as a UUID.
    #[must_use]
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Whether the subject carries the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the subject carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(crate::roles::ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn subject() -> TokenSubject {
        TokenSubject {
            id: Uuid::new_v4(),
            name: "Alice Example".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["User".to_string(), "Moderator".to_string()],
        }
    }

    #[test]
    fn test_claims_carry_subject() {
        let subject = subject();
        let claims = Claims::new(
            &subject,
            "atrium".to_string(),
            "atrium".to_string(),
            Utc::now() + Duration::minutes(15),
        );
        assert_eq!(claims.subject_id(), Some(subject.id));
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_role_checks() {
        let claims = Claims::new(
            &subject(),
            "atrium".to_string(),
            "atrium".to_string(),
            Utc::now() + Duration::minutes(15),
        );
        assert!(claims.has_role("Moderator"));
        assert!(!claims.has_role("Admin"));
        assert!(!claims.is_admin());
    }
}
