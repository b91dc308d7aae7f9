use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use dm_api::{create_app, telemetry, AppState};
use dm_core::services::{AuthServiceConfig, TokenService, TokenServiceConfig};
use dm_infra::{DatabasePool, MySqlOrderRepository, MySqlProductRepository, MySqlUserRepository};
use dm_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging).context("failed to install tracing subscriber")?;

    config
        .validate()
        .map_err(|reason| anyhow::anyhow!("invalid configuration: {reason}"))?;
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; signing tokens with the development secret");
    }

    tracing::info!(
        environment = ?config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting delivery marketplace API"
    );

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;
    tracing::info!(stats = %pool.get_statistics(), "Database ready");

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let products = Arc::new(MySqlProductRepository::new(pool.get_pool().clone()));
    let orders = Arc::new(MySqlOrderRepository::new(pool.get_pool().clone()));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let state = web::Data::new(AppState::new(
        users,
        products,
        orders,
        token_service,
        AuthServiceConfig::from(&config.auth),
    ));
    let pool_data = web::Data::new(pool.clone());
    let cors = config.cors.clone();

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind to address");

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), &cors).app_data(pool_data.clone())
    })
    .shutdown_timeout(config.server.shutdown_timeout);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await;

    tracing::info!("Server stopped; closing database connections");
    close_pool(&pool).await;
    result.context("server terminated with an error")
}

/// Close the pool, bounded so a stuck connection cannot hang shutdown
async fn close_pool(pool: &DatabasePool) {
    if actix_web::rt::time::timeout(Duration::from_secs(5), pool.close())
        .await
        .is_err()
    {
        tracing::warn!("Timed out closing database connections");
    }
}
