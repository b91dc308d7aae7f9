//! Shared configuration and common types for the delivery marketplace server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error body returned by every endpoint
//! - Common value types (geo points)

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{GeoPoint, LatLng};
