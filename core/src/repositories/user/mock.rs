//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// In-memory user repository
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn list_by_roles(&self, roles: &[Role]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| roles.contains(&u.role))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        // Unique email, mirroring the database index
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }
}
