use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

// Top of the usual breach lists. Checked case-insensitively.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "12345678",
    "123456789",
    "1234567890",
    "qwerty123",
    "qwertyuiop",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "welcome1",
    "admin123",
    "letmein1",
    "monkey123",
    "dragon123",
    "trustno1",
    "superman",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("This password is too short. It must contain at least 8 characters.")]
    TooShort,
    #[error("This password is entirely numeric.")]
    EntirelyNumeric,
    #[error("This password is too common.")]
    TooCommon,
}

/// A new password that has passed the strength policy.
///
/// The policy only gates credentials being *set* (signup, password change).
/// Candidate passwords being checked against a stored hash stay as plain
/// `Secret<String>` since existing credentials may predate the policy.
#[derive(Clone, Debug)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(raw: Secret<String>) -> Result<Self, PasswordError> {
        let candidate = raw.expose_secret();
        if candidate.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        if candidate.chars().all(|c| c.is_ascii_digit()) {
            return Err(PasswordError::EntirelyNumeric);
        }
        if COMMON_PASSWORDS.contains(&candidate.to_lowercase().as_str()) {
            return Err(PasswordError::TooCommon);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
