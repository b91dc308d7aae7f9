//! Error types for authentication, token handling and input validation

use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Access denied")]
    InsufficientPermissions,

    #[error("Registration disabled")]
    RegistrationDisabled,

    #[error("Role {role} cannot move an order to {status}")]
    TransitionNotAllowed { role: String, status: String },
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields { fields: Vec<String> },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid role: {value}")]
    InvalidRole { value: String },

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Invalid payment method: {value}")]
    InvalidPaymentMethod { value: String },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingFields {
            fields: vec![field.into()],
        }
    }
}
