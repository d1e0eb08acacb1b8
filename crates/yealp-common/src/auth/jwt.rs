//! JWT utilities for authentication
//!
//! Two token kinds are issued: access tokens, which point at a stored login
//! session, and short-lived password reset tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use yealp_core::UserId;

use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    PasswordReset,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
    /// Login session the token belongs to (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Claims {
    /// Get the user ID
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Get the session ID carried by an access token
    pub fn session_id(&self) -> Result<Uuid, AppError> {
        self.session_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issued access token as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    reset_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, reset_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            reset_token_expiry,
        }
    }

    /// Issue an access token bound to a login session
    pub fn generate_access_token(
        &self,
        user_id: &UserId,
        session_id: Uuid,
        lifetime_secs: i64,
    ) -> Result<AccessToken, AppError> {
        let access_token = self.encode_token(
            user_id,
            TokenType::Access,
            Some(session_id.to_string()),
            lifetime_secs,
        )?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: lifetime_secs,
        })
    }

    /// Issue a password reset token for the emailed link
    pub fn generate_reset_token(&self, user_id: &UserId) -> Result<String, AppError> {
        self.encode_token(
            user_id,
            TokenType::PasswordReset,
            None,
            self.reset_token_expiry,
        )
    }

    fn encode_token(
        &self,
        user_id: &UserId,
        token_type: TokenType,
        session_id: Option<String>,
        lifetime_secs: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime_secs)).timestamp(),
            token_type,
            session_id,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate an access token and return the claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_of_type(token, TokenType::Access)
    }

    /// Validate a reset token and return the user it was issued for
    pub fn validate_reset_token(&self, token: &str) -> Result<UserId, AppError> {
        self.decode_of_type(token, TokenType::PasswordReset)?.user_id()
    }

    fn decode_of_type(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("reset_token_expiry", &self.reset_token_expiry)
            .finish_non_exhaustive()
    }
}
