//! # Infrastructure Layer
//!
//! Concrete persistence for the delivery marketplace. The domain crate only
//! knows the repository traits; this crate backs them with MySQL through SQLx.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use dm_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlOrderRepository, MySqlProductRepository, MySqlUserRepository,
    PoolStatistics,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
