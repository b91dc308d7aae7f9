//! Server configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
            workers: 0,
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables; `PORT` wins over `SERVER_PORT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port,
            workers: env_or("SERVER_WORKERS", defaults.workers),
            shutdown_timeout: env_or("SERVER_SHUTDOWN_TIMEOUT", defaults.shutdown_timeout),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            allowed_origins,
            max_age: env_or("CORS_MAX_AGE", 3600),
        }
    }

    /// Whether any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

fn default_shutdown_timeout() -> u64 {
    30
}
