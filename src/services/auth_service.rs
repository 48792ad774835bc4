//! Authentication service - Handles token issuance and verification.
//!
//! Credentials are checked by the repository (`get_user`), which reports
//! an unknown login and a wrong password identically.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_ISSUER, TOKEN_TYPE_BEARER};
use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::Repository;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and return a signed token
    async fn login(&self, login: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify signature and expiry, then check the subject still exists
    async fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        iss: TOKEN_ISSUER.to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn decode_token(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService
pub struct Authenticator {
    repo: Arc<dyn Repository>,
    config: Config,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn Repository>, config: Config) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, login: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self.repo.get_user(login, password).await?;
        tracing::debug!(user_id = user.id, "User logged in");
        generate_token(&user, &self.config)
    }

    async fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode_token(token, &self.config)?;
        self.repo.get_user_by_id(claims.sub).await?;
        Ok(claims)
    }
}
