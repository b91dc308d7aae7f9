//! Driver-only reporting

use actix_web::{web, HttpResponse};
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};

use crate::app::AppState;
use crate::dto::EarningsQuery;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// `GET /api/livreurs/earnings?period=today|week|month`
pub async fn earnings<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    query: web::Query<EarningsQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let summary = state
        .earnings_service
        .summary(auth.user_id, query.period())
        .await?;
    Ok(HttpResponse::Ok().json(summary))
}
