//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Secret used when `JWT_SECRET` is not set
pub const DEFAULT_JWT_SECRET: &str = "dev_secret";

/// Credentials are valid for a week
pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 7;

/// bcrypt work factor for new password hashes
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Token lifetime in days
    pub expiry_days: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
            expiry_days: DEFAULT_TOKEN_EXPIRY_DAYS,
            issuer: String::from("delivery-marketplace"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiry_days: env_or("JWT_EXPIRY_DAYS", defaults.expiry_days),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Token lifetime in seconds
    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_days * 86_400
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    /// bcrypt cost factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Whether new accounts may register
    #[serde(default = "default_allow_registration")]
    pub allow_registration: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            allow_registration: default_allow_registration(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            bcrypt_cost: env_or("BCRYPT_COST", DEFAULT_BCRYPT_COST),
            allow_registration: env_or("ALLOW_REGISTRATION", true),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    DEFAULT_BCRYPT_COST
}

fn default_allow_registration() -> bool {
    true
}
