use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{email::Email, password::Password, person_name::PersonName};

/// A persisted user record. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub username: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Input for creating a user. The store assigns id and timestamps and
/// hashes the password.
pub struct NewUser {
    pub email: Email,
    pub username: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: Password,
}

impl NewUser {
    /// Username defaults to the email address when none is supplied.
    pub fn new(
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        password: Password,
    ) -> Self {
        let username = email.as_str().to_string();
        Self {
            email,
            username,
            first_name,
            last_name,
            password,
        }
    }
}

/// Partial profile update: only `Some` fields change.
#[derive(Default)]
pub struct ProfileChanges {
    pub email: Option<Email>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}
