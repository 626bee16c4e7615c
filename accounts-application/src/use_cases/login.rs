use accounts_core::{
    Email, TokenIssuer, TokenIssuerError, TokenPair, User, UserStore, UserStoreError,
};
use secrecy::Secret;

/// Error types for login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Deliberately covers both "no such user" and "wrong password".
    #[error("Invalid email or password.")]
    InvalidCredentials,
    /// Only reachable when the password was correct.
    #[error("User account is disabled.")]
    AccountDisabled,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Login use case - verifies credentials and issues a token pair
pub struct LoginUseCase<U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    user_store: U,
    token_issuer: I,
}

impl<U, I> LoginUseCase<U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    pub fn new(user_store: U, token_issuer: I) -> Self {
        Self {
            user_store,
            token_issuer,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all, fields(email = %email))]
    pub async fn execute(
        &self,
        email: Email,
        password: Secret<String>,
    ) -> Result<(User, TokenPair), LoginError> {
        let user = match self.user_store.authenticate_user(&email, &password).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound | UserStoreError::IncorrectPassword) => {
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::UserStoreError(e)),
        };

        if !user.is_active {
            return Err(LoginError::AccountDisabled);
        }

        self.user_store
            .record_login(user.id)
            .await
            .map_err(LoginError::UserStoreError)?;

        let tokens = self.token_issuer.issue(&user).await?;
        Ok((user, tokens))
    }
}
