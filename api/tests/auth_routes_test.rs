//! Registration, login and account administration over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use common::*;
use dm_core::services::AuthServiceConfig;
use serde_json::json;

#[actix_web::test]
async fn test_register_returns_user_and_token() {
    let app = app(state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Amina",
            "email": "amina@example.com",
            "password": "motdepasse",
            "role": "CLIENT",
        }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["name"], "Amina");
    assert_eq!(body["user"]["email"], "amina@example.com");
    assert_eq!(body["user"]["role"], "CLIENT");
    assert!(body["user"]["_id"].is_string());
    assert!(body["user"].get("passwordHash").is_none());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn test_duplicate_email_is_rejected() {
    let app = app(state()).await;
    register(&app, "Amina", "CLIENT").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Amina Bis",
            "email": "amina@example.com",
            "password": "autre",
            "role": "COMMERCANT",
        }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "EMAIL_IN_USE");
    assert_eq!(body["message"], "Email already in use");
}

#[actix_web::test]
async fn test_register_lists_missing_fields() {
    let app = app(state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "Amina"}))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["fields"], json!(["email", "password", "role"]));
}

#[actix_web::test]
async fn test_register_rejects_unknown_role() {
    let app = app(state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Amina",
            "email": "amina@example.com",
            "password": "motdepasse",
            "role": "CHEF",
        }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_registration_can_be_disabled() {
    let app = app(state_with(AuthServiceConfig {
        bcrypt_cost: 4,
        allow_registration: false,
    }))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Amina",
            "email": "amina@example.com",
            "password": "motdepasse",
            "role": "CLIENT",
        }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[actix_web::test]
async fn test_login() {
    let app = app(state()).await;
    let account = register(&app, "Amina", "LIVREUR").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "amina@example.com", "password": "motdepasse"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["_id"], account.id.as_str());
    assert_eq!(body["user"]["role"], "LIVREUR");
    assert!(body["token"].is_string());

    for credentials in [
        json!({"email": "amina@example.com", "password": "wrong"}),
        json!({"email": "nobody@example.com", "password": "motdepasse"}),
        json!({}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(credentials)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn test_user_listing_defaults_to_clients_and_merchants() {
    let app = app(state()).await;
    let admin = register(&app, "Admin", "ADMIN").await;
    register(&app, "Karim", "CLIENT").await;
    register(&app, "Chez Nadia", "COMMERCANT").await;
    register(&app, "Yanis", "LIVREUR").await;

    let (status, body) = get(&app, Some(&admin), "/api/auth/users").await;
    assert_eq!(status, StatusCode::OK);
    let mut roles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["role"].as_str().unwrap())
        .collect();
    roles.sort_unstable();
    assert_eq!(roles, vec!["CLIENT", "COMMERCANT"]);
    assert!(body[0].get("passwordHash").is_none());

    let (status, body) = get(&app, Some(&admin), "/api/auth/users?role=LIVREUR").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Yanis");
    assert_eq!(body[0]["isApproved"], false);

    let (status, _) = get(&app, Some(&admin), "/api/auth/users?role=chef").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_user_administration_requires_admin() {
    let app = app(state()).await;
    let client = register(&app, "Karim", "CLIENT").await;

    let (status, body) = get(&app, Some(&client), "/api/auth/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, _) = get(&app, None, "/api/auth/users").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/auth/users/{}", client.id))
        .insert_header(bearer(&client.token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_approves_driver_and_ignores_admin_role() {
    let app = app(state()).await;
    let admin = register(&app, "Admin", "ADMIN").await;
    let driver = register(&app, "Yanis", "LIVREUR").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/auth/users/{}", driver.id))
        .insert_header(bearer(&admin.token))
        .set_json(json!({"isApproved": true, "role": "ADMIN"}))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isApproved"], true);
    assert_eq!(body["role"], "LIVREUR");
    assert!(body.get("passwordHash").is_none());

    let req = test::TestRequest::put()
        .uri(&format!("/api/auth/users/{}", driver.id))
        .insert_header(bearer(&admin.token))
        .set_json(json!({"role": "COMMERCANT"}))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["role"], "COMMERCANT");
    assert_eq!(body["isApproved"], true);
}

#[actix_web::test]
async fn test_delete_user() {
    let app = app(state()).await;
    let admin = register(&app, "Admin", "ADMIN").await;
    let client = register(&app, "Karim", "CLIENT").await;
    let uri = format!("/api/auth/users/{}", client.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let req = test::TestRequest::put()
        .uri("/api/auth/users/not-a-uuid")
        .insert_header(bearer(&admin.token))
        .set_json(json!({"isApproved": true}))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
