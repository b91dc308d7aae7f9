//! Account administration, restricted to ADMIN by the route table.

use actix_web::{web, HttpResponse};
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};
use dm_core::services::UserChanges;

use crate::app::AppState;
use crate::dto::{UpdateUserRequest, UsersQuery};
use crate::handlers::{parse_id, ApiError};
use crate::middleware::AuthContext;

/// `GET /api/auth/users?role=`
pub async fn list_users<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    query: web::Query<UsersQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let users = state.auth_service.list_users(query.role()?).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// `PUT /api/auth/users/{id}`
pub async fn update_user<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let user_id = parse_id(&path, "User")?;
    tracing::debug!(admin_id = %auth.user_id, user_id = %user_id, "Updating account");

    let user = state
        .auth_service
        .update_user(user_id, UserChanges::from(request.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// `DELETE /api/auth/users/{id}`
pub async fn delete_user<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let user_id = parse_id(&path, "User")?;
    tracing::debug!(admin_id = %auth.user_id, user_id = %user_id, "Deleting account");

    state.auth_service.delete_user(user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User deleted successfully"
    })))
}
