use accounts_core::{Password, UserStore, UserStoreError};
use secrecy::Secret;
use uuid::Uuid;

/// Error types for change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Old password is incorrect.")]
    WrongOldPassword,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Change password use case - verifies the old password and replaces the hash
pub struct ChangePasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// The old password is a candidate credential and bypasses the strength
    /// policy; the new one arrives already policy-checked.
    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all, fields(%user_id))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        old_password: Secret<String>,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        match self.user_store.verify_password(user_id, &old_password).await {
            Ok(()) => {}
            Err(UserStoreError::IncorrectPassword) => {
                return Err(ChangePasswordError::WrongOldPassword);
            }
            Err(e) => return Err(ChangePasswordError::UserStoreError(e)),
        }

        self.user_store
            .set_new_password(user_id, new_password)
            .await
            .map_err(ChangePasswordError::UserStoreError)?;

        Ok(())
    }
}
