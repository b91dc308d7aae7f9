//! Configuration for the token service

use dm_shared::config::auth::{JwtConfig, DEFAULT_JWT_SECRET, DEFAULT_TOKEN_EXPIRY_DAYS};
use jsonwebtoken::Algorithm;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Token lifetime in seconds
    pub expiry_seconds: i64,
    /// Value of the `iss` claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            expiry_seconds: DEFAULT_TOKEN_EXPIRY_DAYS * 86_400,
            issuer: String::from("delivery-marketplace"),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            expiry_seconds: config.expiry_seconds(),
            issuer: config.issuer.clone(),
        }
    }
}
