//! Shared handler plumbing: error mapping and service endpoints

pub mod error;
pub mod health;

pub use error::{json_config, not_found, parse_id, query_config, ApiError};
