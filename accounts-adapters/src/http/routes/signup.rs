use accounts_application::SignupUseCase;
use accounts_core::{Email, Password, PersonName, TokenIssuer, UserStore};
use axum::{Json, extract::State, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;

use super::UserBody;
use super::error::{ApiError, messages};
use crate::http::envelope::created;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: Secret<String>,
    pub password_confirm: Secret<String>,
    pub first_name: String,
    pub last_name: String,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, I>(
    State((user_store, token_issuer)): State<(U, I)>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let email = Email::parse(&request.email)
        .map_err(|e| ApiError::validation(messages::REGISTRATION_FAILED, "email", e.to_string()))?;
    let first_name = PersonName::parse(&request.first_name).map_err(|e| {
        ApiError::validation(messages::REGISTRATION_FAILED, "first_name", e.to_string())
    })?;
    let last_name = PersonName::parse(&request.last_name).map_err(|e| {
        ApiError::validation(messages::REGISTRATION_FAILED, "last_name", e.to_string())
    })?;

    if request.password.expose_secret() != request.password_confirm.expose_secret() {
        return Err(ApiError::validation(
            messages::REGISTRATION_FAILED,
            "password",
            "Password fields didn't match.",
        ));
    }
    let password = Password::parse(request.password).map_err(|e| {
        ApiError::validation(messages::REGISTRATION_FAILED, "password", e.to_string())
    })?;

    let use_case = SignupUseCase::new(user_store, token_issuer);
    let (user, tokens) = use_case
        .execute(email, first_name, last_name, password)
        .await?;

    Ok(created(
        "User registered successfully.",
        Some(json!({ "user": UserBody::from(&user), "tokens": tokens })),
    ))
}
