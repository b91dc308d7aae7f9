use dm_core::domain::entities::user::Role;
use dm_core::services::{Registration, UserChanges};
use serde::Deserialize;
use validator::Validate;

use super::present;
use crate::handlers::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    pub password: Option<String>,

    /// One of ADMIN, CLIENT, LIVREUR, COMMERCANT
    #[validate(required)]
    pub role: Option<String>,

    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn into_registration(self) -> Result<Registration, ApiError> {
        let role: Role = present(self.role, "role")?.parse()?;
        Ok(Registration {
            name: present(self.name, "name")?,
            email: present(self.email, "email")?,
            password: present(self.password, "password")?,
            role,
            phone: self.phone,
        })
    }
}

/// Absent fields behave like empty ones and fail as invalid credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    pub role: Option<String>,
}

impl UsersQuery {
    pub fn role(&self) -> Result<Option<Role>, ApiError> {
        match self.role.as_deref() {
            None | Some("") => Ok(None),
            Some(role) => Ok(Some(role.parse()?)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "isApproved")]
    pub is_approved: Option<bool>,
    pub role: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    /// Unknown role names are dropped like non-assignable ones
    fn from(request: UpdateUserRequest) -> Self {
        UserChanges {
            is_approved: request.is_approved,
            role: request.role.and_then(|role| role.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validated;
    use actix_web::ResponseError;

    #[test]
    fn test_register_reports_every_missing_field() {
        let request: RegisterRequest =
            serde_json::from_value(serde_json::json!({"name": "Amina", "email": ""})).unwrap();

        let err = validated(request).unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::BAD_REQUEST);
        match err.0 {
            dm_core::DomainError::ValidationErr(
                dm_core::errors::ValidationError::MissingFields { fields },
            ) => assert_eq!(fields, vec!["email", "password", "role"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Amina",
            "email": "amina@example.com",
            "password": "secret",
            "role": "SUPERUSER"
        }))
        .unwrap();

        let err = validated(request).unwrap().into_registration().unwrap_err();
        assert_eq!(err.to_string(), "Invalid role: SUPERUSER");
    }

    #[test]
    fn test_update_drops_unknown_role() {
        let request: UpdateUserRequest =
            serde_json::from_value(serde_json::json!({"isApproved": true, "role": "ROOT"})).unwrap();
        let changes = UserChanges::from(request);
        assert_eq!(changes.is_approved, Some(true));
        assert!(changes.role.is_none());
    }

    #[test]
    fn test_users_query_role() {
        assert_eq!(UsersQuery::default().role().unwrap(), None);
        let query = UsersQuery {
            role: Some("LIVREUR".to_string()),
        };
        assert_eq!(query.role().unwrap(), Some(Role::Livreur));
        let query = UsersQuery {
            role: Some("livreur".to_string()),
        };
        assert!(query.role().is_err());
    }
}
