//! Mapping of domain errors onto HTTP responses.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; the body is always
//! the shared `ErrorResponse`. Internal failures are logged with their detail
//! and reported to the caller as a generic "Server error".

use actix_web::{error::InternalError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use dm_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use dm_shared::{error_codes, ErrorResponse};
use uuid::Uuid;

/// Error type returned by route handlers and middleware
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self(error.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self(error.into())
    }
}

impl ApiError {
    /// Stable code carried in the `error` field
    pub fn code(&self) -> &'static str {
        match &self.0 {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                error_codes::VALIDATION_ERROR
            }
            DomainError::Auth(auth) => match auth {
                AuthError::EmailAlreadyInUse => error_codes::EMAIL_IN_USE,
                AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AuthError::MissingToken => error_codes::UNAUTHORIZED,
                AuthError::InsufficientPermissions | AuthError::RegistrationDisabled => {
                    error_codes::FORBIDDEN
                }
                AuthError::TransitionNotAllowed { .. } => error_codes::INVALID_TRANSITION,
            },
            DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
            DomainError::Token(_) => error_codes::TOKEN_INVALID,
            DomainError::NotFound { .. } | DomainError::PreconditionFailed { .. } => {
                error_codes::NOT_FOUND
            }
            DomainError::Internal { .. } | DomainError::Database { .. } => {
                error_codes::INTERNAL_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match &self.0 {
            DomainError::Internal { .. } | DomainError::Database { .. } => {
                "Server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
            DomainError::Auth(auth) => match auth {
                AuthError::EmailAlreadyInUse | AuthError::InvalidCredentials => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InsufficientPermissions
                | AuthError::RegistrationDisabled
                | AuthError::TransitionNotAllowed { .. } => StatusCode::FORBIDDEN,
            },
            DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::NotFound { .. } | DomainError::PreconditionFailed { .. } => {
                StatusCode::NOT_FOUND
            }
            DomainError::Internal { .. } | DomainError::Database { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed with a server error");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        let mut body = ErrorResponse::new(self.code(), self.public_message());
        if let DomainError::ValidationErr(ValidationError::MissingFields { fields }) = &self.0 {
            body = body.add_detail("fields", fields);
        }

        HttpResponse::build(status).json(body)
    }
}

/// Parse a path id; a malformed id names a resource that cannot exist
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError(DomainError::not_found(resource)))
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

/// JSON body extractor that answers malformed payloads with a 400 body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Query-string extractor with the same 400 body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = bad_request(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
