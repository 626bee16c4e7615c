use std::sync::Arc;

use accounts_core::{
    Email, NewUser, Password, ProfileChanges, User, UserStore, UserStoreError,
};
use chrono::Utc;
use dashmap::DashMap;
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

struct StoredUser {
    user: User,
    password: Secret<String>,
}

/// In-memory user store for tests. Passwords are kept and compared in
/// plaintext; hashing is the Postgres store's concern.
#[derive(Clone, Default)]
pub struct HashMapUserStore {
    users: Arc<DashMap<Uuid, StoredUser>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_id_by_email(&self, email: &Email) -> Option<Uuid> {
        self.users
            .iter()
            .find(|entry| entry.user.email == *email)
            .map(|entry| entry.user.id)
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        if self.find_id_by_email(&new_user.email).is_some() {
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
            date_joined: Utc::now(),
            last_login: None,
        };
        self.users.insert(
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
            .get(&id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn email_taken(
        &self,
        email: &Email,
        excluding: Option<Uuid>,
    ) -> Result<bool, UserStoreError> {
        Ok(self
            .users
            .iter()
            .any(|entry| entry.user.email == *email && Some(entry.user.id) != excluding))
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<User, UserStoreError> {
        let id = self
            .find_id_by_email(email)
            .ok_or(UserStoreError::UserNotFound)?;
        let stored = self.users.get(&id).ok_or(UserStoreError::UserNotFound)?;
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
        let stored = self.users.get(&id).ok_or(UserStoreError::UserNotFound)?;
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
        let mut stored = self.users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
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
        let mut stored = self.users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.password = new_password.as_ref().clone();
        Ok(())
    }

    async fn record_login(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut stored = self.users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.last_login = Some(Utc::now());
        Ok(())
    }

    async fn set_active(&self, ids: &[Uuid], active: bool) -> Result<u64, UserStoreError> {
        let mut affected = 0;
        for id in ids {
            if let Some(mut stored) = self.users.get_mut(id) {
                stored.user.is_active = active;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn set_staff(&self, ids: &[Uuid], staff: bool) -> Result<u64, UserStoreError> {
        let mut affected = 0;
        for id in ids {
            if let Some(mut stored) = self.users.get_mut(id) {
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
