//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dm_core::domain::entities::user::{Role, User};
use dm_core::errors::{AuthError, DomainError};
use dm_core::repositories::UserRepository;

use super::{column, database_error, is_unique_violation, parse_enum, parse_uuid, point, POINT_FROM_WKT};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, phone, address, \
     ST_Longitude(location) AS location_lng, ST_Latitude(location) AS location_lat, \
     is_approved, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = column(row, "id")?;

        Ok(User {
            id: parse_uuid(&id, "users.id")?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            role: parse_enum::<Role>(row, "role")?,
            phone: column(row, "phone")?,
            address: column(row, "address")?,
            location: point(row, "location")?,
            is_approved: column(row, "is_approved")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn rows_to_users(rows: &[MySqlRow]) -> Result<Vec<User>, DomainError> {
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn find_one(&self, predicate: &str, value: String) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, predicate);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to fetch user", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM users WHERE id IN (", USER_COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to fetch users", e))?;

        Self::rows_to_users(&rows)
    }

    async fn list_by_roles(&self, roles: &[Role]) -> Result<Vec<User>, DomainError> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM users WHERE role IN (",
            USER_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for role in roles {
            separated.push_bind(role.as_str());
        }
        separated.push_unseparated(")");
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list users", e))?;

        Self::rows_to_users(&rows)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, phone, address,
                location, is_approved, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, {}, ?, ?, ?)
            "#,
            POINT_FROM_WKT
        );

        sqlx::query(&sql)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone)
            .bind(&user.address)
            .bind(user.location.to_wkt())
            .bind(user.is_approved)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyInUse)
                } else {
                    database_error("Failed to create user", e)
                }
            })?;

        tracing::debug!(user_id = %user.id, role = %user.role, "User row inserted");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, role = ?, phone = ?,
                address = ?, location = {}, is_approved = ?, updated_at = ?
            WHERE id = ?
            "#,
            POINT_FROM_WKT
        );

        let result = sqlx::query(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone)
            .bind(&user.address)
            .bind(user.location.to_wkt())
            .bind(user.is_approved)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyInUse)
                } else {
                    database_error("Failed to update user", e)
                }
            })?;

        // MySQL counts changed rows, so an identical write reports zero
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to check email", e))?;

        let total: i64 = column(&row, "total")?;
        Ok(total > 0)
    }
}
