//! Cross-cutting behavior: authentication, error bodies and service routes

mod common;

use actix_web::{http::StatusCode, test};
use common::*;
use dm_core::domain::entities::user::Role;
use dm_core::services::{TokenService, TokenServiceConfig};
use uuid::Uuid;

#[actix_web::test]
async fn test_missing_token() {
    let app = app(state()).await;

    let (status, body) = get(&app, None, "/api/commandes/my").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "No token provided");
    assert!(body["timestamp"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/commandes/my")
        .insert_header(("Authorization", "Basic a2FyaW06c2VjcmV0"))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_invalid_token() {
    let app = app(state()).await;

    let req = test::TestRequest::get()
        .uri("/api/commandes/my")
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_token_signed_with_other_secret() {
    let app = app(state()).await;
    let forger = TokenService::new(TokenServiceConfig {
        jwt_secret: "not-the-server-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let token = forger.issue(Uuid::new_v4(), Role::Admin).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/users")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_token() {
    let app = app(state()).await;
    let issuer = TokenService::new(TokenServiceConfig {
        expiry_seconds: -3600,
        ..TokenServiceConfig::default()
    });
    let token = issuer.issue(Uuid::new_v4(), Role::Client).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/commandes/my")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_role_is_read_from_token() {
    let app = app(state()).await;
    let driver = register(&app, "Yanis", "LIVREUR").await;

    let (status, body) = get(&app, Some(&driver), "/api/commandes/my").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");

    let (status, _) = get(&app, Some(&driver), "/api/commandes/my-deliveries").await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let app = app(state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_service_routes() {
    let app = app(state()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, actix_web::web::Bytes::from_static(b"Hello Backend from Rust!"));

    let (status, body) = get(&app, None, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "not_configured");

    let (status, body) = get(&app, None, "/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
