//! Product catalog handlers

use actix_web::{web, HttpResponse};
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{validated, CreateProductRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// `GET /api/produits`: available products with their merchant
pub async fn list<U, P, O>(state: web::Data<AppState<U, P, O>>) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let products = state.catalog_service.list_available().await?;
    Ok(HttpResponse::Ok().json(products))
}

/// `POST /api/produits`: the caller becomes the product's merchant
pub async fn create<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let product = validated(request.into_inner())?.into_new_product()?;
    let product = state
        .catalog_service
        .create_product(auth.user_id, product)
        .await?;
    Ok(HttpResponse::Created().json(product))
}
