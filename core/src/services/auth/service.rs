//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Roles listed to administrators when no filter is given
const DEFAULT_LISTED_ROLES: [Role; 2] = [Role::Client, Role::Commercant];

/// Input for account registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Changes an administrator may apply to an account
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub is_approved: Option<bool>,
    /// Applied only for CLIENT or COMMERCANT, ignored otherwise
    pub role: Option<Role>,
}

/// Authentication service for registration, login and account administration
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new account and sign a credential for it
    ///
    /// This method:
    /// 1. Checks that every required field is present
    /// 2. Rejects an email already in use
    /// 3. Hashes the password with bcrypt
    /// 4. Stores the user, unapproved for drivers
    /// 5. Issues a token carrying the user id and role
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthResponse> {
        if !self.config.allow_registration {
            return Err(AuthError::RegistrationDisabled.into());
        }

        let missing: Vec<String> = [
            ("name", &registration.name),
            ("email", &registration.email),
            ("password", &registration.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing }.into());
        }

        if self
            .user_repository
            .exists_by_email(&registration.email)
            .await?
        {
            tracing::info!(
                event = "registration_rejected",
                reason = "email_in_use",
                "Registration attempted with an email already in use"
            );
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        let password_hash = hash_password(registration.password, self.config.bcrypt_cost).await?;
        let user = User::new(
            registration.name,
            registration.email,
            password_hash,
            registration.role,
            registration.phone,
        );

        // The unique index still rejects a concurrent duplicate here
        let user = self.user_repository.create(user).await?;
        let token = self.token_service.issue(user.id, user.role)?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            event = "user_registered",
            "New account registered"
        );

        Ok(AuthResponse::new(&user, token))
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let Some(user) = self.user_repository.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::info!(
                user_id = %user.id,
                event = "login_failed",
                "Password mismatch"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue(user.id, user.role)?;
        tracing::debug!(user_id = %user.id, event = "login_succeeded", "User logged in");

        Ok(AuthResponse::new(&user, token))
    }

    /// List accounts for administrators, newest first
    ///
    /// Without a role filter, clients and merchants are listed.
    pub async fn list_users(&self, role: Option<Role>) -> DomainResult<Vec<UserProfile>> {
        let users = match role {
            Some(role) => self.user_repository.list_by_roles(&[role]).await?,
            None => {
                self.user_repository
                    .list_by_roles(&DEFAULT_LISTED_ROLES)
                    .await?
            }
        };

        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Apply administrator changes to an account
    pub async fn update_user(&self, id: Uuid, changes: UserChanges) -> DomainResult<UserProfile> {
        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if let Some(approved) = changes.is_approved {
            user.set_approved(approved);
        }
        if let Some(role) = changes.role.filter(Role::is_admin_assignable) {
            user.set_role(role);
        }

        let user = self.user_repository.update(user).await?;
        tracing::info!(
            user_id = %user.id,
            approved = user.is_approved,
            role = %user.role,
            event = "user_updated",
            "Account updated by administrator"
        );

        Ok(UserProfile::from(&user))
    }

    /// Delete an account; orders and products referencing it are kept
    pub async fn delete_user(&self, id: Uuid) -> DomainResult<()> {
        if !self.user_repository.delete(id).await? {
            return Err(DomainError::not_found("User"));
        }

        tracing::info!(user_id = %id, event = "user_deleted", "Account deleted by administrator");
        Ok(())
    }
}
