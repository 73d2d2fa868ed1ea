use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{sha256_hex, SecurityConfig};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn admin(username: String, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: username,
            role: ADMIN_ROLE.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

pub const ADMIN_ROLE: &str = "admin";

/// Request-scoped identity of the admin performing an operation.
///
/// Built from a verified token and passed explicitly into every admin write.
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl AdminContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            issued_at: Utc
                .timestamp_opt(claims.iat, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }

    /// Context for operations not triggered over HTTP (CLI imports, tests).
    pub fn system(name: &str) -> Self {
        Self {
            username: name.to_string(),
            issued_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "JWT secret not configured"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    if token_data.claims.role != ADMIN_ROLE {
        return Err(JwtError::InvalidToken("token does not carry the admin role".to_string()));
    }
    Ok(token_data.claims)
}

/// Checks a login attempt against the single configured admin account.
pub fn verify_admin(security: &SecurityConfig, username: &str, password: &str) -> bool {
    if security.admin_password_sha256.is_empty() {
        return false;
    }
    username == security.admin_username && sha256_hex(password) == security.admin_password_sha256
}
