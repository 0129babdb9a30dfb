//! # Atrium Security
//!
//! Security toolkit for Atrium: JWT issuance and validation, refresh
//! tokens, Argon2 password hashing, email-based two-step verification, and
//! well-known role constants.

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod refresh_token;
pub mod roles;

pub use authenticator::EmailAuthenticator;
pub use jwt::{AccessToken, Claims, TokenProvider, TokenSubject};
pub use password::PasswordHasher;
pub use refresh_token::RefreshToken;
