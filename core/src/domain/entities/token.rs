//! Token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the user at issue time
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a user, valid for `expiry_seconds` from now
    pub fn new(user_id: Uuid, role: Role, expiry_seconds: i64, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Parses the subject as a user ID
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
