//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use dm_shared::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

/// Role of an account in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Platform operator
    Admin,
    /// Customer placing orders
    Client,
    /// Delivery driver
    Livreur,
    /// Merchant selling products
    Commercant,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Client, Role::Livreur, Role::Commercant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Client => "CLIENT",
            Role::Livreur => "LIVREUR",
            Role::Commercant => "COMMERCANT",
        }
    }

    /// Drivers wait for an administrator before they are approved
    pub fn starts_approved(&self) -> bool {
        !matches!(self, Role::Livreur)
    }

    /// Roles an administrator may assign through the user update endpoint
    pub fn is_admin_assignable(&self) -> bool {
        matches!(self, Role::Client | Role::Commercant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidRole {
                value: s.to_string(),
            })
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique login email
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub role: Role,

    pub phone: Option<String>,

    pub address: Option<String>,

    /// Last known position, `[0, 0]` when unknown
    pub location: GeoPoint,

    /// Whether an administrator approved the account
    pub is_approved: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User; approval follows the role default
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            phone,
            address: None,
            location: GeoPoint::origin(),
            is_approved: role.starts_approved(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_approved(&mut self, approved: bool) {
        self.is_approved = approved;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> User {
        User::new(
            "Amina".to_string(),
            "amina@example.com".to_string(),
            "hash".to_string(),
            role,
            None,
        )
    }

    #[test]
    fn test_livreur_starts_unapproved() {
        assert!(!user_with_role(Role::Livreur).is_approved);
        assert!(user_with_role(Role::Client).is_approved);
        assert!(user_with_role(Role::Commercant).is_approved);
        assert!(user_with_role(Role::Admin).is_approved);
    }

    #[test]
    fn test_new_user_has_origin_location() {
        let user = user_with_role(Role::Client);
        assert_eq!(user.location.coordinates, [0.0, 0.0]);
        assert!(user.address.is_none());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("LIVREUR".parse::<Role>(), Ok(Role::Livreur));
        assert!(matches!(
            "livreur".parse::<Role>(),
            Err(ValidationError::InvalidRole { .. })
        ));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Commercant).unwrap();
        assert_eq!(json, "\"COMMERCANT\"");
    }

    #[test]
    fn test_admin_assignable_roles() {
        assert!(Role::Client.is_admin_assignable());
        assert!(Role::Commercant.is_admin_assignable());
        assert!(!Role::Admin.is_admin_assignable());
        assert!(!Role::Livreur.is_admin_assignable());
    }
}
