//! Configuration for the authentication service

use dm_shared::config::auth::{AuthConfig, DEFAULT_BCRYPT_COST};

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor for new hashes
    pub bcrypt_cost: u32,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            allow_registration: true,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            allow_registration: config.allow_registration,
        }
    }
}
