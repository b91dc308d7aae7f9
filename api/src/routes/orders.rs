//! Order lifecycle handlers
//!
//! Every write that depends on the order's current status goes through a
//! conditional update in the service, so handlers never read-then-write.

use actix_web::{web, HttpRequest, HttpResponse};
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{validated, CreateOrderRequest, LocationRequest, StatusRequest};
use crate::handlers::{parse_id, ApiError};
use crate::middleware::AuthContext;

/// `POST /api/commandes`
///
/// # Request Body
///
/// ```json
/// {
///     "merchantId": "6f1c...",
///     "items": [{"productId": "9a2e...", "quantity": 2}],
///     "paymentMethod": "CASH",
///     "deliveryAddress": "12 rue des Lilas",
///     "clientLocation": {"lat": 48.85, "lng": 2.35}
/// }
/// ```
///
/// Names and prices are taken from the catalog; lines whose product is
/// unknown are dropped.
pub async fn create<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let order = validated(request.into_inner())?.into_new_order()?;
    let order = state.order_service.create(auth.user_id, order).await?;
    Ok(HttpResponse::Created().json(order))
}

/// `GET /api/commandes/test`
pub async fn route_check(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Route registration working!",
        "path": req.path(),
    }))
}

/// `GET /api/commandes/my`
pub async fn list_mine<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let orders = state.order_service.list_for_client(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// `GET /api/commandes/available`: orders accepted by their merchant
pub async fn list_available<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let orders = state.order_service.list_available().await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// `GET /api/commandes/my-deliveries`
pub async fn list_deliveries<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let orders = state.order_service.list_for_driver(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// `PUT /api/commandes/{id}/status` with `{"status": "..."}`
pub async fn update_status<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<StatusRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let status = request.status()?;
    let order_id = parse_id(&path, "Order")?;
    let order = state
        .order_service
        .update_status(auth.caller(), order_id, status)
        .await?;
    Ok(HttpResponse::Ok().json(order))
}

/// `PUT /api/commandes/{id}/assign`
pub async fn assign<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let order_id = parse_id(&path, "Order")?;
    let order = state.order_service.assign(auth.user_id, order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// `GET /api/commandes/{id}/track`
pub async fn track<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let order_id = parse_id(&path, "Order")?;
    let tracking = state.order_service.track(order_id).await?;
    Ok(HttpResponse::Ok().json(tracking))
}

/// `PUT /api/commandes/{id}/location` with `{"lat": .., "lng": ..}`
pub async fn update_location<U, P, O>(
    state: web::Data<AppState<U, P, O>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<LocationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let location = validated(request.into_inner())?.lat_lng()?;
    let order_id = parse_id(&path, "Order")?;
    let tracking = state
        .order_service
        .update_driver_location(auth.user_id, order_id, location)
        .await?;
    Ok(HttpResponse::Ok().json(tracking))
}
