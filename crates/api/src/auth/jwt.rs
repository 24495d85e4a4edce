//! Session-token generation and validation.
//!
//! Sessions are HS256-signed JWTs containing a [`Claims`] payload whose
//! subject is the signed-in e-mail address. The OAuth callback service
//! (out of tree) mints tokens with [`issue_session_token`] after the
//! provider confirms the address; this server only validates them and
//! applies the allow-list.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the signed-in user's e-mail address.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit logs.
    pub jti: String,
}

/// Configuration for session-token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in minutes (default: 720, one working day).
    pub session_expiry_mins: i64,
}

/// Default session expiry in minutes.
const DEFAULT_SESSION_EXPIRY_MINS: i64 = 720;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `SESSION_JWT_SECRET`        | **yes**  | --      |
    /// | `SESSION_TOKEN_EXPIRY_MINS` | no       | `720`   |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_JWT_SECRET")
            .expect("SESSION_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_JWT_SECRET must not be empty");

        let session_expiry_mins: i64 = std::env::var("SESSION_TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_MINS.to_string())
            .parse()
            .expect("SESSION_TOKEN_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            session_expiry_mins,
        }
    }
}

/// Generate an HS256 session token for the given e-mail address.
///
/// The token carries the address, issue time, expiration, and a unique
/// `jti` claim so individual sessions are distinguishable in logs.
pub fn issue_session_token(
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_expiry_mins * 60;

    let claims = Claims {
        sub: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
