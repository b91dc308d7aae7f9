//! Authentication service module
//!
//! This module provides account management:
//! - Registration and login with bcrypt-hashed passwords
//! - Token issuance through the token service
//! - Administrator listing, approval and deletion of accounts

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Registration, UserChanges};
