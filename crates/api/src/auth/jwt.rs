//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed and carry a [`Claims`] payload. Admins and heroes
//! get different lifetimes.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use superfix_core::roles::Role;
use superfix_core::types::DbId;
use uuid::Uuid;

use crate::config::{parse_var, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the admin or hero database id.
    pub sub: DbId,
    pub role: Role,
    /// Hero alias, shown by the portal. Absent for admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub admin_expiry_hours: i64,
    pub hero_expiry_hours: i64,
}

const DEFAULT_ADMIN_EXPIRY_HOURS: i64 = 24;
const DEFAULT_HERO_EXPIRY_HOURS: i64 = 24 * 7;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ADMIN_EXPIRY_HOURS` | no       | `24`    |
    /// | `JWT_HERO_EXPIRY_HOURS`  | no       | `168`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            secret,
            admin_expiry_hours: parse_var("JWT_ADMIN_EXPIRY_HOURS", DEFAULT_ADMIN_EXPIRY_HOURS)?,
            hero_expiry_hours: parse_var("JWT_HERO_EXPIRY_HOURS", DEFAULT_HERO_EXPIRY_HOURS)?,
        })
    }

    pub fn expiry_hours(&self, role: Role) -> i64 {
        match role {
            Role::Admin => self.admin_expiry_hours,
            Role::Hero => self.hero_expiry_hours,
        }
    }
}

/// Generate an HS256 access token for an admin or hero.
pub fn generate_access_token(
    principal_id: DbId,
    role: Role,
    alias: Option<&str>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: principal_id,
        role,
        alias: alias.map(str::to_string),
        exp: now + config.expiry_hours(role) * 3600,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
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
