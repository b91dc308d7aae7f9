//! Request bodies and query strings accepted by the API.
//!
//! Required fields are declared as `Option` and checked with `validator`, so a
//! missing field yields the domain "Missing required fields" error listing
//! every absent field rather than a serde rejection naming only the first.

pub mod auth;
pub mod livreur;
pub mod order;
pub mod product;

use dm_core::errors::ValidationError;
use validator::{Validate, ValidationErrorsKind};

use crate::handlers::ApiError;

pub use auth::{LoginRequest, RegisterRequest, UpdateUserRequest, UsersQuery};
pub use livreur::EarningsQuery;
pub use order::{CreateOrderRequest, LocationRequest, OrderLineRequest, StatusRequest};
pub use product::CreateProductRequest;

/// Run the derived validation, reporting failing fields in sorted order.
///
/// Absent or empty fields are reported as missing; any other failure
/// (an out-of-range coordinate, a bad nested object) as an invalid format.
pub fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    let Err(errors) = payload.validate() else {
        return Ok(payload);
    };

    let mut missing = Vec::new();
    let mut invalid = Vec::new();
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs)
                if errs.iter().all(|e| e.code == "required" || e.code == "length") =>
            {
                missing.push(field.to_string())
            }
            _ => invalid.push(field.to_string()),
        }
    }

    if missing.is_empty() {
        invalid.sort();
        return Err(ValidationError::InvalidFormat {
            field: invalid.join(", "),
        }
        .into());
    }
    missing.sort();
    Err(ValidationError::MissingFields { fields: missing }.into())
}

/// Take a field that validation has already proven present
pub(crate) fn present<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ValidationError::missing(field).into())
}
