//! Token service module for JWT management
//!
//! Issues and verifies the HS256 bearer credentials that carry a user's id
//! and role.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
