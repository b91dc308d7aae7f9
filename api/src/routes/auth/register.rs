use actix_web::{web, HttpResponse};
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{validated, RegisterRequest};
use crate::handlers::ApiError;

/// Handler for `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Amina",
///     "email": "amina@example.com",
///     "password": "secret",
///     "role": "CLIENT",
///     "phone": "+33612345678"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{user: {_id, name, email, role}, token}`.
pub async fn register<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let registration = validated(request.into_inner())?.into_registration()?;
    let response = state.auth_service.register(registration).await?;
    Ok(HttpResponse::Created().json(response))
}
