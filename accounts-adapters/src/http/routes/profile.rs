use accounts_application::{GetProfileUseCase, UpdateProfileUseCase};
use accounts_core::{Email, PersonName, ProfileChanges, TokenIssuer, UserStore};
use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::Deserialize;
use serde_json::json;

use super::UserBody;
use super::error::{ApiError, messages};
use crate::http::{authenticate, envelope::success};

#[tracing::instrument(name = "Get Profile", skip_all)]
pub async fn get_profile<U, I>(
    State((user_store, token_issuer)): State<(U, I)>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let identity = authenticate(&token_issuer, bearer).await?;

    let use_case = GetProfileUseCase::new(user_store);
    let user = use_case.execute(identity.user_id).await?;

    Ok(success(
        "Profile retrieved successfully.",
        Some(json!({ "user": UserBody::from(&user) })),
    ))
}

/// All fields optional: only supplied fields change.
#[derive(Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[tracing::instrument(name = "Update Profile", skip_all)]
pub async fn update_profile<U, I>(
    State((user_store, token_issuer)): State<(U, I)>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    I: TokenIssuer + Clone + 'static,
{
    let identity = authenticate(&token_issuer, bearer).await?;

    let mut changes = ProfileChanges::default();
    if let Some(raw) = &request.email {
        changes.email = Some(Email::parse(raw).map_err(|e| {
            ApiError::validation(messages::PROFILE_UPDATE_FAILED, "email", e.to_string())
        })?);
    }
    if let Some(raw) = &request.first_name {
        changes.first_name = Some(PersonName::parse(raw).map_err(|e| {
            ApiError::validation(messages::PROFILE_UPDATE_FAILED, "first_name", e.to_string())
        })?);
    }
    if let Some(raw) = &request.last_name {
        changes.last_name = Some(PersonName::parse(raw).map_err(|e| {
            ApiError::validation(messages::PROFILE_UPDATE_FAILED, "last_name", e.to_string())
        })?);
    }

    let use_case = UpdateProfileUseCase::new(user_store);
    let user = use_case.execute(identity.user_id, changes).await?;

    Ok(success(
        "Profile updated successfully.",
        Some(json!({ "user": UserBody::from(&user) })),
    ))
}
