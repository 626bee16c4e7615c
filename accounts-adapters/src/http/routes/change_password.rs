use accounts_application::ChangePasswordUseCase;
use accounts_core::{Password, TokenIssuer, UserStore};
use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::{ApiError, messages};
use crate::http::{authenticate, envelope::success};

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
    pub new_password_confirm: Secret<String>,
}

#[tracing::instrument(name = "Change Password", skip_all)]
pub async fn change_password<U, I>(
    State((user_store, token_issuer)): State<(U, I)>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let identity = authenticate(&token_issuer, bearer).await?;

    if request.new_password.expose_secret() != request.new_password_confirm.expose_secret() {
        return Err(ApiError::validation(
            messages::PASSWORD_CHANGE_FAILED,
            "new_password",
            "New password fields didn't match.",
        ));
    }
    let new_password = Password::parse(request.new_password).map_err(|e| {
        ApiError::validation(messages::PASSWORD_CHANGE_FAILED, "new_password", e.to_string())
    })?;

    let use_case = ChangePasswordUseCase::new(user_store);
    use_case
        .execute(identity.user_id, request.old_password, new_password)
        .await?;

    Ok(success("Password changed successfully.", None))
}
