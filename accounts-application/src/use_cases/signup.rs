use accounts_core::{
    Email, NewUser, Password, PersonName, TokenIssuer, TokenIssuerError, TokenPair, User,
    UserStore, UserStoreError,
};

/// Error types for signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    /// Caught by the pre-check; rendered as a field-level validation error.
    #[error("A user with this email already exists.")]
    EmailTaken,
    /// Two signups raced past the pre-check; the unique constraint won.
    #[error("A user with this email already exists.")]
    EmailConflict,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Token issuer error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Signup use case - creates the user record and issues the first token pair
pub struct SignupUseCase<U, I>
where
    U: UserStore,
    I: TokenIssuer,
{
    user_store: U,
    token_issuer: I,
}

impl<U, I> SignupUseCase<U, I>
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

    /// Execute the signup use case
    ///
    /// The email uniqueness pre-check gives the friendly validation error;
    /// the store's unique constraint remains the final arbiter under
    /// concurrent signups and surfaces as `EmailConflict`.
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all, fields(email = %email))]
    pub async fn execute(
        &self,
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        password: Password,
    ) -> Result<(User, TokenPair), SignupError> {
        if self
            .user_store
            .email_taken(&email, None)
            .await
            .map_err(SignupError::UserStoreError)?
        {
            return Err(SignupError::EmailTaken);
        }

        let new_user = NewUser::new(email, first_name, last_name, password);
        let user = match self.user_store.add_user(new_user).await {
            Ok(user) => user,
            Err(UserStoreError::UserAlreadyExists) => return Err(SignupError::EmailConflict),
            Err(e) => return Err(SignupError::UserStoreError(e)),
        };

        let tokens = self.token_issuer.issue(&user).await?;
        Ok((user, tokens))
    }
}
