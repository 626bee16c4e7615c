use serde::Serialize;
use uuid::Uuid;

use super::email::Email;

/// Bearer credential pair issued at signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// The identity claim carried by a verified access token.
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub user_id: Uuid,
    pub email: Email,
}
