//! Identity of an authenticated caller.

use uuid::Uuid;

use crate::domain::entities::user::Role;

/// The `(userId, role)` pair resolved from a verified credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
