use accounts_core::{TokenIssuer, TokenIssuerError};

/// Error types for logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Logout use case - revokes the supplied refresh token
pub struct LogoutUseCase<I>
where
    I: TokenIssuer,
{
    token_issuer: I,
}

impl<I> LogoutUseCase<I>
where
    I: TokenIssuer,
{
    pub fn new(token_issuer: I) -> Self {
        Self { token_issuer }
    }

    /// Revocation is not idempotent: revoking a token twice is an error.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<(), LogoutError> {
        self.token_issuer.revoke(refresh_token).await?;
        Ok(())
    }
}
