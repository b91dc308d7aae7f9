//! Account representation returned to administrators.

use chrono::{DateTime, Utc};
use dm_shared::GeoPoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};

/// A user without its password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub location: GeoPoint,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            address: user.address.clone(),
            location: user.location,
            is_approved: user.is_approved,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_never_exposes_password_hash() {
        let user = User::new(
            "Yanis".to_string(),
            "yanis@example.com".to_string(),
            "$2b$10$secret".to_string(),
            Role::Client,
            Some("0600000000".to_string()),
        );
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("$2b$10$secret"));
        assert_eq!(json["_id"], user.id.to_string());
        assert_eq!(json["isApproved"], true);
        assert_eq!(json["location"]["type"], "Point");
    }
}
