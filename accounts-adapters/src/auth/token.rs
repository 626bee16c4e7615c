use accounts_core::{
    Email, RevokedTokenStore, TokenIdentity, TokenIssuer, TokenIssuerError, TokenPair, User,
};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtIssuerConfig {
    pub access_secret: Secret<String>,
    pub refresh_secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub token_type: TokenType,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

/// JWT bearer-credential issuer: HS256 access/refresh pair with distinct
/// secrets. Access verification is stateless; refresh revocation records the
/// token's `jti` with its remaining lifetime as TTL.
#[derive(Clone)]
pub struct JwtTokenIssuer<B> {
    revoked_token_store: B,
    config: JwtIssuerConfig,
}

impl<B> JwtTokenIssuer<B> {
    pub fn new(revoked_token_store: B, config: JwtIssuerConfig) -> Self {
        Self {
            revoked_token_store,
            config,
        }
    }

    fn secret_for(&self, token_type: TokenType) -> &[u8] {
        match token_type {
            TokenType::Access => self.config.access_secret.expose_secret().as_bytes(),
            TokenType::Refresh => self.config.refresh_secret.expose_secret().as_bytes(),
        }
    }

    fn ttl_for(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.config.access_ttl_seconds,
            TokenType::Refresh => self.config.refresh_ttl_seconds,
        }
    }

    fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        token_type: TokenType,
    ) -> Result<String, TokenIssuerError> {
        let ttl = chrono::Duration::try_seconds(self.ttl_for(token_type)).ok_or_else(|| {
            TokenIssuerError::UnexpectedError("Failed to create token duration".to_string())
        })?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenIssuerError::UnexpectedError("Duration out of range".to_string()))?
            .timestamp();

        let exp: usize = exp.try_into().map_err(|_| {
            TokenIssuerError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;
        let iat: usize = now.timestamp().try_into().map_err(|_| {
            TokenIssuerError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat,
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret_for(token_type)),
        )
        .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))
    }

    /// Decode and check signature, expiry, and token type. Any failure is
    /// `InvalidToken`; details are never surfaced to callers.
    fn decode_claims(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<Claims, TokenIssuerError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_for(expected_type)),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenIssuerError::InvalidToken)?;

        if claims.token_type != expected_type {
            return Err(TokenIssuerError::InvalidToken);
        }

        Ok(claims)
    }

    fn remaining_lifetime(claims: &Claims) -> u64 {
        let now = Utc::now().timestamp().max(0) as u64;
        (claims.exp as u64).saturating_sub(now)
    }
}

#[async_trait]
impl<B> TokenIssuer for JwtTokenIssuer<B>
where
    B: RevokedTokenStore + Clone + 'static,
{
    #[tracing::instrument(name = "JwtTokenIssuer::issue", skip_all)]
    async fn issue(&self, user: &User) -> Result<TokenPair, TokenIssuerError> {
        let user_id = user.id.to_string();
        let access = self.generate_token(&user_id, user.email.as_str(), TokenType::Access)?;
        let refresh = self.generate_token(&user_id, user.email.as_str(), TokenType::Refresh)?;
        Ok(TokenPair { access, refresh })
    }

    #[tracing::instrument(name = "JwtTokenIssuer::verify", skip_all)]
    async fn verify(&self, access_token: &str) -> Result<TokenIdentity, TokenIssuerError> {
        let claims = self.decode_claims(access_token, TokenType::Access)?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| TokenIssuerError::InvalidToken)?;
        let email = Email::parse(&claims.email).map_err(|_| TokenIssuerError::InvalidToken)?;

        Ok(TokenIdentity { user_id, email })
    }

    #[tracing::instrument(name = "JwtTokenIssuer::revoke", skip_all)]
    async fn revoke(&self, refresh_token: &str) -> Result<(), TokenIssuerError> {
        let claims = self.decode_claims(refresh_token, TokenType::Refresh)?;

        let already_revoked = self
            .revoked_token_store
            .is_revoked(&claims.jti)
            .await
            .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))?;
        if already_revoked {
            return Err(TokenIssuerError::InvalidToken);
        }

        self.revoked_token_store
            .revoke(claims.jti.clone(), Self::remaining_lifetime(&claims))
            .await
            .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "JwtTokenIssuer::refresh", skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<String, TokenIssuerError> {
        let claims = self.decode_claims(refresh_token, TokenType::Refresh)?;

        let revoked = self
            .revoked_token_store
            .is_revoked(&claims.jti)
            .await
            .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))?;
        if revoked {
            return Err(TokenIssuerError::InvalidToken);
        }

        self.generate_token(&claims.sub, &claims.email, TokenType::Access)
    }
}
