use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use accounts_core::{
    Email, NewUser, Password, ProfileChanges, TokenIdentity, TokenIssuer, TokenIssuerError,
    TokenPair, User, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

struct StoredUser {
    user: User,
    password: Secret<String>,
}

/// In-memory user store shared by the use-case tests. Stores plaintext
/// passwords; hashing is an adapter concern.
#[derive(Clone, Default)]
pub(crate) struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

impl InMemoryUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn insert(&self, email: &str, password: &str) -> Uuid {
        self.insert_with_flags(email, password, true, false, false).await
    }

    pub(crate) async fn insert_with_flags(
        &self,
        email: &str,
        password: &str,
        is_active: bool,
        is_staff: bool,
        is_superuser: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let email = Email::parse(email).unwrap();
        let user = User {
            id,
            email: email.clone(),
            username: email.into_string(),
            first_name: accounts_core::PersonName::parse("Test").unwrap(),
            last_name: accounts_core::PersonName::parse("User").unwrap(),
            is_active,
            is_staff,
            is_superuser,
            date_joined: chrono::Utc::now(),
            last_login: None,
        };
        self.users.write().await.insert(
            id,
            StoredUser {
                user,
                password: Secret::from(password.to_string()),
            },
        );
        id
    }

    pub(crate) async fn stored_password(&self, id: Uuid) -> String {
        self.users.read().await[&id].password.expose_secret().clone()
    }

    pub(crate) async fn stored_user(&self, id: Uuid) -> User {
        self.users.read().await[&id].user.clone()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|s| s.user.email == new_user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let id = Uuid::new_v4();
        let user = User {
            id,
            email: new_user.email,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: chrono::Utc::now(),
            last_login: None,
        };
        users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password: new_user.password.as_ref().clone(),
            },
        );
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|s| s.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn email_taken(
        &self,
        email: &Email,
        excluding: Option<Uuid>,
    ) -> Result<bool, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|s| s.user.email == *email && Some(s.user.id) != excluding))
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let stored = users
            .values()
            .find(|s| s.user.email == *email)
            .ok_or(UserStoreError::UserNotFound)?;
        if stored.password.expose_secret() != password.expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(stored.user.clone())
    }

    async fn verify_password(
        &self,
        id: Uuid,
        password: &Secret<String>,
    ) -> Result<(), UserStoreError> {
        let users = self.users.read().await;
        let stored = users.get(&id).ok_or(UserStoreError::UserNotFound)?;
        if stored.password.expose_secret() != password.expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        if let Some(email) = changes.email {
            stored.user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            stored.user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            stored.user.last_name = last_name;
        }
        Ok(stored.user.clone())
    }

    async fn set_new_password(
        &self,
        id: Uuid,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.password = new_password.as_ref().clone();
        Ok(())
    }

    async fn record_login(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.last_login = Some(chrono::Utc::now());
        Ok(())
    }

    async fn set_active(&self, ids: &[Uuid], active: bool) -> Result<u64, UserStoreError> {
        let mut users = self.users.write().await;
        let mut affected = 0;
        for id in ids {
            if let Some(stored) = users.get_mut(id) {
                stored.user.is_active = active;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn set_staff(&self, ids: &[Uuid], staff: bool) -> Result<u64, UserStoreError> {
        let mut users = self.users.write().await;
        let mut affected = 0;
        for id in ids {
            if let Some(stored) = users.get_mut(id) {
                // Superusers keep staff status no matter what.
                if !staff && stored.user.is_superuser {
                    continue;
                }
                stored.user.is_staff = staff;
                affected += 1;
            }
        }
        Ok(affected)
    }
}

/// Token issuer stub: deterministic token strings, revocation tracked in a
/// set, double revocation rejected.
#[derive(Clone, Default)]
pub(crate) struct StubTokenIssuer {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl StubTokenIssuer {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenIssuer for StubTokenIssuer {
    async fn issue(&self, user: &User) -> Result<TokenPair, TokenIssuerError> {
        Ok(TokenPair {
            access: format!("access-{}", user.id),
            refresh: format!("refresh-{}", user.id),
        })
    }

    async fn verify(&self, _access_token: &str) -> Result<TokenIdentity, TokenIssuerError> {
        unimplemented!()
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), TokenIssuerError> {
        let mut revoked = self.revoked.write().await;
        if !revoked.insert(refresh_token.to_string()) {
            return Err(TokenIssuerError::InvalidToken);
        }
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, TokenIssuerError> {
        if self.revoked.read().await.contains(refresh_token) {
            return Err(TokenIssuerError::InvalidToken);
        }
        Ok("access-refreshed".to_string())
    }
}
