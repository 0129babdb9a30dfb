//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenSubject};
use atrium_config::TokenConfig;
use atrium_core::{AtriumError, AtriumResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// An issued access token with its expiration.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<TokenConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<TokenConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Creates an access token for the given subject.
    pub fn create_token(&self, subject: &TokenSubject) -> AtriumResult<AccessToken> {
        let expires_at = Utc::now() + Duration::seconds(self.config.access_token_ttl_secs as i64);

        let claims = Claims::new(
            subject,
            self.config.issuer.clone(),
            self.config.audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AtriumError::Internal(format!("Failed to create access token: {}", e)))?;

        debug!(subject = %subject.id, "Issued access token");
        Ok(AccessToken { token, expires_at })
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> AtriumResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AtriumError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AtriumError::InvalidToken("Invalid token signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AtriumError::InvalidToken("Invalid token issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AtriumError::InvalidToken("Invalid token audience".to_string())
                }
                _ => AtriumError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}
