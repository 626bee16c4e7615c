use accounts_application::LogoutUseCase;
use accounts_core::TokenIssuer;
use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::Deserialize;

use super::error::ApiError;
use crate::http::{authenticate, envelope::success};

#[derive(Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<I>(
    State(token_issuer): State<I>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<LogoutRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    I: TokenIssuer + Clone + 'static,
{
    authenticate(&token_issuer, bearer).await?;

    let refresh_token = request
        .refresh_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::bad_request("Refresh token is required."))?;

    let use_case = LogoutUseCase::new(token_issuer);
    use_case.execute(&refresh_token).await?;

    Ok(success("Logout successful.", None))
}
