//! Refresh token entity.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A long-lived, opaque token exchanged for new access tokens.
///
/// The token value is 32 random bytes, base64-encoded. Revocation keeps an
/// audit trail: who revoked it, why, and which token (if any) replaced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Token id.
    pub id: Uuid,
    /// Owner of the token.
    pub user_id: Uuid,
    /// Opaque token value.
    pub token: String,
    /// Expiration instant.
    pub expires_at: DateTime<Utc>,
    /// IP address the token was issued to.
    pub created_by_ip: String,
    /// Issuance instant.
    pub created_at: DateTime<Utc>,
    /// Revocation instant, if revoked.
    pub revoked_at: Option<DateTime<Utc>>,
    /// IP address that requested revocation.
    pub revoked_by_ip: Option<String>,
    /// Token that replaced this one on rotation.
    pub replaced_by_token: Option<String>,
    /// Why the token was revoked.
    pub revocation_reason: Option<String>,
}

impl RefreshToken {
    /// Issues a new refresh token for a user.
    #[must_use]
    pub fn issue(user_id: Uuid, created_by_ip: &str, ttl_days: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            token: Self::generate_token(),
            expires_at: now + Duration::days(ttl_days as i64),
            created_by_ip: created_by_ip.to_string(),
            created_at: now,
            revoked_at: None,
            revoked_by_ip: None,
            replaced_by_token: None,
            revocation_reason: None,
        }
    }

    /// Generates an opaque token value.
    #[must_use]
    pub fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    /// Whether the token has passed its expiration.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Whether the token can still be exchanged.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none() && !self.is_expired()
    }

    /// Revokes the token.
    pub fn revoke(&mut self, ip: &str, reason: Option<String>, replaced_by: Option<String>) {
        self.revoked_at = Some(Utc::now());
        self.revoked_by_ip = Some(ip.to_string());
        self.revocation_reason = reason;
        self.replaced_by_token = replaced_by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_active() {
        let token = RefreshToken::issue(Uuid::new_v4(), "203.0.113.7", 7);
        assert!(token.is_active());
        assert!(!token.is_expired());
        assert_eq!(token.created_by_ip, "203.0.113.7");
    }

    #[test]
    fn test_token_values_are_unique() {
        assert_ne!(RefreshToken::generate_token(), RefreshToken::generate_token());
    }

    #[test]
    fn test_revoked_token_is_inactive() {
        let mut token = RefreshToken::issue(Uuid::new_v4(), "203.0.113.7", 7);
        let replacement = RefreshToken::generate_token();
        token.revoke("203.0.113.8", Some("rotated".to_string()), Some(replacement.clone()));

        assert!(!token.is_active());
        assert_eq!(token.revoked_by_ip.as_deref(), Some("203.0.113.8"));
        assert_eq!(token.replaced_by_token, Some(replacement));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let token = RefreshToken::issue(Uuid::new_v4(), "203.0.113.7", 0);
        assert!(token.is_expired());
        assert!(!token.is_active());
    }
}
