//! CORS middleware configuration for cross-origin requests.
//!
//! With no `ALLOWED_ORIGINS` configured any origin is accepted, which is what
//! browser front-ends in development expect. A configured list restricts the
//! API to exactly those origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use dm_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::debug!("Configuring CORS for any origin");
        return cors.allow_any_origin();
    }

    config.allowed_origins.iter().fold(cors, |cors, origin| {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors.allowed_origin(origin)
    })
}
