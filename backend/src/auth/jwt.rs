//! JWT issuance and validation
//!
//! Tokens are compact HS512 JWTs carrying the user's id and name, valid
//! for one day from issuance. Keys are derived once from the configured
//! secret and shared across handlers.

use crate::services::User;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token validity window
pub const TOKEN_LIFETIME_DAYS: i64 = 1;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier (stringified user id)
    pub nameid: String,
    /// Subject name (normalized username)
    pub unique_name: String,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create keys from the UTF-8 bytes of the secret.
    /// This should be called once at startup.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("JWT signing secret is not configured (set APP__JWT__SECRET)");
        }

        Ok(Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        })
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service, failing if the secret is empty.
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.validate_nbf = true;

        Ok(Self {
            keys: JwtKeys::new(secret)?,
            validation: Arc::new(validation),
        })
    }

    /// Issue a token for a verified user
    #[inline]
    pub fn issue_token(&self, user: &User) -> Result<String> {
        self.issue_token_at(user, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_token_at(&self, user: &User, now: DateTime<Utc>) -> Result<String> {
        let exp = now + Duration::days(TOKEN_LIFETIME_DAYS);

        let claims = Claims {
            nameid: user.id.to_string(),
            unique_name: user.username.clone(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Validate a token's signature and time bounds and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
