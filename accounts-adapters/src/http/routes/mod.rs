pub mod change_password;
pub mod error;
pub mod login;
pub mod logout;
pub mod profile;
pub mod signup;

pub use change_password::change_password;
pub use login::login;
pub use logout::logout;
pub use profile::{get_profile, update_profile};
pub use signup::signup;

use accounts_core::User;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The public representation of a user. Staff/superuser flags and
/// `last_login` stay internal.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            date_joined: user.date_joined,
            is_active: user.is_active,
        }
    }
}
