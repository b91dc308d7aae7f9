//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first and returns `DomainError` so that services stay
//! independent from the storage backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example
/// ```no_run
/// # use dm_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(user) = repo.find_by_email("amina@example.com").await? {
///     println!("User role: {}", user.role);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by login email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Fetch every user whose id is in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;

    /// List users having one of `roles`, newest first
    async fn list_by_roles(&self, roles: &[Role]) -> Result<Vec<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyInUse))` - Email taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with this id
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check if an account already uses this email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
