//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The record exists but did not satisfy the precondition of a conditional write
    #[error("{message}")]
    PreconditionFailed { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
