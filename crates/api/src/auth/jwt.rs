//! Access and refresh tokens.
//!
//! An access token is an HS256 JWT whose [`AccessClaims`] carry the account
//! id and its admin flag as stored when the token was issued. Demoting an
//! account therefore takes effect at the next refresh. A refresh token is
//! an opaque UUID handed to the client once; the server keeps only its
//! SHA-256 digest in `sessions.refresh_token_hash`.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use techhub_core::types::{DbId, Timestamp};
use techhub_db::models::user::User;
use uuid::Uuid;

/// Payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// `users.id` of the holder.
    pub sub: DbId,
    /// `users.is_admin` at issue time.
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl AccessClaims {
    fn for_user(user: &User, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            sub: user.id,
            is_admin: user.is_admin,
            iat: issued_at,
            exp: issued_at + ttl_secs,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

fn env_i64(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be an integer, got {raw:?}")),
        Err(_) => default,
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (60) and
    /// `JWT_REFRESH_EXPIRY_DAYS` (7).
    ///
    /// # Panics
    ///
    /// Panics on a missing or empty secret, or a non-integer lifetime.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");
        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 60),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// When a session opened at `now` stops accepting its refresh token.
    pub fn refresh_expires_at(&self, now: Timestamp) -> Timestamp {
        now + Duration::days(self.refresh_token_expiry_days)
    }
}

pub fn issue_access_token(
    user: &User,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now().timestamp();
    let claims = AccessClaims::for_user(user, issued_at, config.access_ttl_secs());
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry (with the library's default leeway).
pub fn verify_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// A freshly minted refresh token. Only `digest` is persisted.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
}

impl RefreshToken {
    pub fn mint() -> Self {
        let plaintext = Uuid::new_v4().to_string();
        let digest = refresh_token_digest(&plaintext);
        Self { plaintext, digest }
    }
}

/// Lowercase hex SHA-256 of a refresh token, as stored in `sessions`.
pub fn refresh_token_digest(plaintext: &str) -> String {
    format!("{:x}", Sha256::digest(plaintext.as_bytes()))
}
