//! JWT token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use explorer_core::config::AuthConfig;
use explorer_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Signs bearer tokens with the shared HMAC secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(config.jwt_ttl_hours as i64),
        }
    }

    /// Issues a token for `user_id` valid for the configured lifetime.
    pub fn issue(&self, user_id: Uuid, username: Option<&str>) -> Result<String, AppError> {
        let now = Utc::now();
        self.encode(&Claims {
            sub: user_id,
            username: username.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        })
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign token", e)
        })
    }
}
