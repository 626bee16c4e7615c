use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    email::Email,
    password::Password,
    user::{NewUser, ProfileChanges, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Durable storage for user records.
///
/// The unique constraint on the normalized email column is the final
/// arbiter for concurrent signups; `add_user` surfaces a violation as
/// `UserAlreadyExists`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError>;

    /// Whether any user other than `excluding` owns this email.
    async fn email_taken(
        &self,
        email: &Email,
        excluding: Option<Uuid>,
    ) -> Result<bool, UserStoreError>;

    /// Look up by email and verify the candidate password against the
    /// stored hash. Does not check the active flag; callers decide what an
    /// inactive match means.
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<User, UserStoreError>;

    /// Verify a candidate password for an existing user by id.
    async fn verify_password(
        &self,
        id: Uuid,
        password: &Secret<String>,
    ) -> Result<(), UserStoreError>;

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserStoreError>;

    async fn set_new_password(&self, id: Uuid, new_password: Password)
    -> Result<(), UserStoreError>;

    /// Stamp `last_login` with the current time.
    async fn record_login(&self, id: Uuid) -> Result<(), UserStoreError>;

    /// Bulk-toggle the active flag. Returns the number of affected rows.
    async fn set_active(&self, ids: &[Uuid], active: bool) -> Result<u64, UserStoreError>;

    /// Bulk-toggle the staff flag. Revoking staff skips superusers.
    /// Returns the number of affected rows.
    async fn set_staff(&self, ids: &[Uuid], staff: bool) -> Result<u64, UserStoreError>;
}

// RevokedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RevokedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Blacklist of revoked refresh tokens, keyed by token id (`jti`).
#[async_trait]
pub trait RevokedTokenStore: Send + Sync {
    /// Mark a token id revoked. `ttl_seconds` is the token's remaining
    /// lifetime; the entry may be dropped after that.
    async fn revoke(&self, jti: String, ttl_seconds: u64) -> Result<(), RevokedTokenStoreError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, RevokedTokenStoreError>;
}
