use accounts_application::{
    ChangePasswordError, LoginError, LogoutError, ProfileError, SignupError, UpdateProfileError,
};
use accounts_core::{TokenIssuerError, UserStoreError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::envelope::{ApiResponse, FieldErrors, NON_FIELD_ERRORS};

pub mod messages {
    pub const REGISTRATION_FAILED: &str = "Registration failed. Please check your information.";
    pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
    pub const PROFILE_UPDATE_FAILED: &str = "Profile update failed. Please check your information.";
    pub const PASSWORD_CHANGE_FAILED: &str =
        "Password change failed. Please check your information.";
    pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";
}

/// Error rendered into the standard envelope. Everything a handler can fail
/// with converts into this type in one place.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Option<FieldErrors>,
}

impl ApiError {
    pub fn validation(message: &str, field: &str, detail: impl Into<String>) -> Self {
        Self::with_field(StatusCode::BAD_REQUEST, message, field, detail)
    }

    pub fn conflict(message: &str, field: &str, detail: impl Into<String>) -> Self {
        Self::with_field(StatusCode::CONFLICT, message, field, detail)
    }

    fn with_field(
        status: StatusCode,
        message: &str,
        field: &str,
        detail: impl Into<String>,
    ) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![detail.into()]);
        Self {
            status,
            message: message.to_string(),
            errors: Some(errors),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
            errors: None,
        }
    }

    pub fn missing_credentials() -> Self {
        Self::unauthorized("Authentication credentials were not provided.")
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: messages::UNEXPECTED_ERROR.to_string(),
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse {
            success: false,
            message: self.message,
            data: None,
            errors: self.errors,
        });

        (self.status, body).into_response()
    }
}

impl From<TokenIssuerError> for ApiError {
    fn from(error: TokenIssuerError) -> Self {
        match error {
            TokenIssuerError::InvalidToken => {
                ApiError::unauthorized("Token is invalid or expired.")
            }
            TokenIssuerError::UnexpectedError(e) => {
                tracing::error!(error = %e, "token issuer failure");
                ApiError::internal()
            }
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            // A verified token whose subject no longer resolves.
            UserStoreError::UserNotFound => ApiError::unauthorized("User not found."),
            e => {
                tracing::error!(error = %e, "user store failure");
                ApiError::internal()
            }
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::EmailTaken => ApiError::validation(
                messages::REGISTRATION_FAILED,
                "email",
                error.to_string(),
            ),
            // Two signups raced; the unique constraint decided.
            SignupError::EmailConflict => ApiError::conflict(
                messages::REGISTRATION_FAILED,
                "email",
                error.to_string(),
            ),
            SignupError::UserStoreError(e) => e.into(),
            SignupError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials | LoginError::AccountDisabled => {
                ApiError::validation(messages::LOGIN_FAILED, NON_FIELD_ERRORS, error.to_string())
            }
            LoginError::UserStoreError(e) => e.into(),
            LoginError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::TokenIssuerError(TokenIssuerError::InvalidToken) => {
                ApiError::bad_request("Invalid token.")
            }
            LogoutError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::EmailTaken => ApiError::validation(
                messages::PROFILE_UPDATE_FAILED,
                "email",
                error.to_string(),
            ),
            UpdateProfileError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::WrongOldPassword => ApiError::validation(
                messages::PASSWORD_CHANGE_FAILED,
                "old_password",
                error.to_string(),
            ),
            ChangePasswordError::UserStoreError(e) => e.into(),
        }
    }
}
