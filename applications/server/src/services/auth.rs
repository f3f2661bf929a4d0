//! Password hashing and JWT issuance.
//!
//! Access and refresh tokens are HS256 JWTs signed with the same secret and
//! told apart by the `token_type` claim, so a refresh token can never be
//! presented as an access token (or the reverse).

use crate::config::AuthSettings;
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tempo_core::UserId;

pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// JWT payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issue time (unix seconds)
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Access and refresh token issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(secret: String, access_ttl_hours: u64, refresh_ttl_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::hours(access_ttl_hours as i64),
            refresh_ttl: Duration::days(refresh_ttl_days as i64),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.clone(),
            settings.jwt_expiration_hours,
            settings.jwt_refresh_expiration_days,
        )
        .with_bcrypt_cost(settings.bcrypt_cost)
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    // ===== Passwords =====

    pub fn hash_password(&self, password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, self.bcrypt_cost)?)
    }

    /// Errors only when `hash` is not a bcrypt hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }

    // ===== Tokens =====

    pub fn create_access_token(&self, user_id: UserId) -> Result<String> {
        self.sign(user_id, TokenType::Access)
    }

    pub fn create_refresh_token(&self, user_id: UserId) -> Result<String> {
        self.sign(user_id, TokenType::Refresh)
    }

    /// Issue a fresh access/refresh pair
    pub fn issue_tokens(&self, user_id: UserId) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(user_id)?,
            refresh_token: self.create_refresh_token(user_id)?,
        })
    }

    /// Check signature and expiry, returning the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.verify_as(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.verify_as(token, TokenType::Refresh)
    }

    fn verify_as(&self, token: &str, expected: TokenType) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            return Err(ServerError::Unauthorized("Invalid token type".to_string()));
        }
        claims
            .sub
            .parse()
            .map_err(|_| ServerError::Unauthorized("Invalid token subject".to_string()))
    }

    fn sign(&self, user_id: UserId, token_type: TokenType) -> Result<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let issued_at = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
            token_type,
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding_key,
        )?)
    }
}
