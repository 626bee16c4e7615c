pub mod envelope;
pub mod routes;

use accounts_core::{TokenIdentity, TokenIssuer};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use self::routes::error::ApiError;

/// Resolve the caller's identity from the `Authorization: Bearer` header.
///
/// Access-token verification is stateless; a compromised access token stays
/// valid until it expires.
pub(crate) async fn authenticate<I>(
    token_issuer: &I,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<TokenIdentity, ApiError>
where
    I: TokenIssuer,
{
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(ApiError::missing_credentials)?;
    Ok(token_issuer.verify(bearer.token()).await?)
}
