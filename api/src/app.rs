//! Application state and factory
//!
//! This module wires the domain services together and builds the actix-web
//! `App`. It is shared by the binary and the integration tests, which run
//! the same app over in-memory repositories.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::{self, health, json_config, query_config};
use crate::middleware::create_cors;
use crate::routes;

use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};
use dm_core::services::{
    AuthService, AuthServiceConfig, CatalogService, EarningsService, OrderService, TokenService,
};
use dm_shared::CorsConfig;

/// Application state that holds shared services
pub struct AppState<U, P, O>
where
    U: UserRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub catalog_service: Arc<CatalogService<P, U>>,
    pub order_service: Arc<OrderService<O, P, U>>,
    pub earnings_service: Arc<EarningsService<O, U>>,
    pub token_service: Arc<TokenService>,
}

impl<U, P, O> AppState<U, P, O>
where
    U: UserRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    /// Build every service over the given repositories
    pub fn new(
        users: Arc<U>,
        products: Arc<P>,
        orders: Arc<O>,
        token_service: Arc<TokenService>,
        auth_config: AuthServiceConfig,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&users),
                Arc::clone(&token_service),
                auth_config,
            )),
            catalog_service: Arc::new(CatalogService::new(
                Arc::clone(&products),
                Arc::clone(&users),
            )),
            order_service: Arc::new(OrderService::new(
                Arc::clone(&orders),
                products,
                Arc::clone(&users),
            )),
            earnings_service: Arc::new(EarningsService::new(orders, users)),
            token_service,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, P, O>(
    app_state: web::Data<AppState<U, P, O>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    // The auth middleware looks the verifier up on its own
    let token_service = web::Data::from(Arc::clone(&app_state.token_service));

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .app_data(json_config())
        .app_data(query_config())
        // Last wrapped runs first: requests are traced before CORS answers preflights
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .service(web::scope("/api").configure(routes::configure::<U, P, O>))
        .default_service(web::route().to(handlers::not_found))
}
