use accounts_application::LoginUseCase;
use accounts_core::{Email, TokenIssuer, UserStore};
use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use super::UserBody;
use super::error::{ApiError, messages};
use crate::http::envelope::success;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, I>(
    State((user_store, token_issuer)): State<(U, I)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let email = Email::parse(&request.email)
        .map_err(|e| ApiError::validation(messages::LOGIN_FAILED, "email", e.to_string()))?;

    let use_case = LoginUseCase::new(user_store, token_issuer);
    let (user, tokens) = use_case.execute(email, request.password).await?;

    Ok(success(
        "Login successful.",
        Some(json!({ "user": UserBody::from(&user), "tokens": tokens })),
    ))
}
