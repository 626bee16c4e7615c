use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    token::{TokenIdentity, TokenPair},
    user::User,
};

#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenIssuerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Mints and invalidates bearer credential pairs tied to a user identity.
///
/// Access tokens are stateless and cannot be revoked individually; refresh
/// tokens are revocable. Revocation is not idempotent: revoking an
/// already-revoked token is `InvalidToken`.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, user: &User) -> Result<TokenPair, TokenIssuerError>;

    /// Stateless verification: signature, expiry, and token type only.
    async fn verify(&self, access_token: &str) -> Result<TokenIdentity, TokenIssuerError>;

    async fn revoke(&self, refresh_token: &str) -> Result<(), TokenIssuerError>;

    /// Mint a fresh access token from a live, unrevoked refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, TokenIssuerError>;
}
