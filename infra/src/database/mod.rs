//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Embedded schema migrations
//! - Repository implementations for users, products and orders

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlOrderRepository, MySqlProductRepository, MySqlUserRepository};
