use accounts_core::{ProfileChanges, User, UserStore, UserStoreError};
use uuid::Uuid;

/// Error types for profile retrieval
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct GetProfileUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> GetProfileUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ProfileError> {
        Ok(self.user_store.get_user(user_id).await?)
    }
}

/// Error types for profile update
#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("A user with this email already exists.")]
    EmailTaken,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Partial profile update: only supplied fields change.
pub struct UpdateProfileUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, changes))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UpdateProfileError> {
        if changes.is_empty() {
            return Ok(self.user_store.get_user(user_id).await?);
        }

        if let Some(email) = &changes.email {
            if self.user_store.email_taken(email, Some(user_id)).await? {
                return Err(UpdateProfileError::EmailTaken);
            }
        }

        Ok(self.user_store.update_profile(user_id, changes).await?)
    }
}
