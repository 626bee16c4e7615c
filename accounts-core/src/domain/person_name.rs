use serde::Serialize;
use thiserror::Error;

pub const MAX_NAME_LENGTH: usize = 150;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("This field is required.")]
    Missing,
    #[error("Ensure this field has no more than 150 characters.")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Missing);
        }
        if raw.chars().count() > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
