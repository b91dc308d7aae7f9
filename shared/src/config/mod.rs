//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and password hashing
//! - `database` - MySQL connection pool
//! - `environment` - environment detection and logging
//! - `server` - HTTP listener and CORS

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Call `dotenvy::dotenv()` first when a `.env` file should be honoured.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Reject settings that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.server.port == 0 {
            return Err("server port must be non-zero".to_string());
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
