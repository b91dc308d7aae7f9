//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};

/// Public identity returned alongside a token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Authentication response containing the signed token and the user it identifies
///
/// Returned by both registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user: UserSummary,

    /// HS256 JWT carrying the user id and role
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: &User, token: String) -> Self {
        Self {
            user: UserSummary::from(user),
            token,
        }
    }
}
