//! JWT issuance and validation.

mod claims;
mod token_provider;

pub use claims::{Claims, TokenSubject};
pub use token_provider::{AccessToken, TokenProvider};
