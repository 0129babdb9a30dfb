//! Two-step verification via emailed activation codes.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a random six-digit activation code.
#[must_use]
pub fn generate_activation_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

/// Verifies an activation code against the expected one.
///
/// Comparison ignores surrounding whitespace; empty inputs never verify.
#[must_use]
pub fn verify_activation_code(provided: &str, expected: &str) -> bool {
    let provided = provided.trim();
    let expected = expected.trim();
    !provided.is_empty() && !expected.is_empty() && provided == expected
}

/// Email authenticator enrollment for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAuthenticator {
    /// Owner of the enrollment.
    pub user_id: Uuid,
    /// Outstanding activation code, cleared once verified.
    pub activation_code: Option<String>,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// When the enrollment was created.
    pub created_at: DateTime<Utc>,
}

impl EmailAuthenticator {
    /// Starts an enrollment with a fresh activation code.
    #[must_use]
    pub fn enroll(user_id: Uuid) -> Self {
        Self {
            user_id,
            activation_code: Some(generate_activation_code()),
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    /// Attempts to verify the enrollment with a user-supplied code.
    ///
    /// On success the code is consumed; a verified enrollment has no
    /// outstanding code to replay.
    pub fn verify(&mut self, code: &str) -> bool {
        let matched = self
            .activation_code
            .as_deref()
            .is_some_and(|expected| verify_activation_code(code, expected));

        if matched {
            self.is_verified = true;
            self.activation_code = None;
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_code_is_six_digits() {
        for _ in 0..32 {
            let code = generate_activation_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_verify_trims_whitespace() {
        assert!(verify_activation_code(" 123456 ", "123456"));
        assert!(!verify_activation_code("123456", "654321"));
        assert!(!verify_activation_code("", ""));
    }

    #[test]
    fn test_enrollment_verification_consumes_code() {
        let mut authenticator = EmailAuthenticator::enroll(Uuid::new_v4());
        let code = authenticator.activation_code.clone().unwrap();

        let wrong = if code == "111111" { "222222" } else { "111111" };
        assert!(!authenticator.verify(wrong));
        assert!(authenticator.verify(&code));
        assert!(authenticator.is_verified);
        assert!(authenticator.activation_code.is_none());

        // A consumed code cannot be replayed.
        assert!(!authenticator.verify(&code));
    }
}
