//! Root greeting and health probe.

use actix_web::{web, HttpResponse};
use dm_infra::DatabasePool;

/// `GET /`
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello Backend from Rust!")
}

/// `GET /health`
///
/// Reports the database as well when a pool is registered; a failing probe
/// turns the response into a 503.
pub async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let database = match pool {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "up",
            Ok(false) | Err(_) => "down",
        },
        None => "not_configured",
    };

    let body = serde_json::json!({
        "status": if database == "down" { "degraded" } else { "healthy" },
        "service": "delivery-marketplace-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database == "down" {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
