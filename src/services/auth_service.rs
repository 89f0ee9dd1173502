//! Authentication service.
//!
//! The mobile client proves its telegram identity upstream (initData is
//! checked at the edge) and exchanges the telegram id for a short-lived
//! JWT here. Client rows are created lazily on first authentication.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::errors::AppResult;
use crate::infra::ClientRepository;

/// Roles carried in tokens
pub const ROLE_CLIENT: &str = "client";
pub const ROLE_ADMIN: &str = "admin";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Client ID
    pub sub: i32,
    pub telegram_id: i64,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
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
    /// Exchange a telegram id for a JWT, registering the client on first sight
    async fn authenticate(&self, telegram_id: i64) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService
pub struct Authenticator {
    clients: Arc<dyn ClientRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(clients: Arc<dyn ClientRepository>, config: Config) -> Self {
        Self { clients, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, telegram_id: i64) -> AppResult<TokenResponse> {
        let client = self.clients.get_or_create(telegram_id).await?;

        let role = if self.config.is_super_admin(telegram_id) {
            ROLE_ADMIN
        } else {
            ROLE_CLIENT
        };

        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: client.id,
            telegram_id,
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
