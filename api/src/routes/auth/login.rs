use actix_web::{web, HttpResponse};
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::ApiError;

/// Handler for `POST /api/auth/login`
///
/// Responds with the same shape as registration. Unknown email and wrong
/// password both yield `400 Invalid credentials`.
pub async fn login<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
