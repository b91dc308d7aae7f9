//! Shared harness: the real app over in-memory repositories

#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, Error,
};
use serde_json::{json, Value};

use dm_api::{create_app, AppState};
use dm_core::repositories::{MockOrderRepository, MockProductRepository, MockUserRepository};
use dm_core::services::{AuthServiceConfig, TokenService, TokenServiceConfig};
use dm_shared::CorsConfig;

pub type TestState = AppState<MockUserRepository, MockProductRepository, MockOrderRepository>;

/// Registered account as seen by a client of the API
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub token: String,
}

pub fn state() -> web::Data<TestState> {
    state_with(AuthServiceConfig {
        // Lowest cost bcrypt accepts
        bcrypt_cost: 4,
        allow_registration: true,
    })
}

pub fn state_with(config: AuthServiceConfig) -> web::Data<TestState> {
    web::Data::new(AppState::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockProductRepository::new()),
        Arc::new(MockOrderRepository::new()),
        Arc::new(TokenService::new(TokenServiceConfig::default())),
        config,
    ))
}

pub async fn app(
    state: web::Data<TestState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(create_app(state, &CorsConfig::default())).await
}

/// Call the app and decode the JSON body, `Null` when there is none
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

pub async fn register<S, B>(app: &S, name: &str, role: &str) -> Account
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": "motdepasse",
            "role": role,
            "phone": "+33600000000",
        }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

    Account {
        id: body["user"]["_id"].as_str().unwrap().to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

pub async fn create_product<S, B>(app: &S, merchant: &Account, name: &str, price: f64) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/produits")
        .insert_header(bearer(&merchant.token))
        .set_json(json!({"name": name, "price": price}))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "product creation failed: {body}");
    body["_id"].as_str().unwrap().to_string()
}

pub async fn place_order<S, B>(
    app: &S,
    client: &Account,
    merchant: &Account,
    items: Value,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/commandes")
        .insert_header(bearer(&client.token))
        .set_json(json!({
            "merchantId": merchant.id,
            "items": items,
            "paymentMethod": "CASH",
            "deliveryAddress": "12 rue des Lilas, Lyon",
            "clientLocation": {"lat": 45.76, "lng": 4.83},
        }))
        .to_request();
    send(app, req).await
}

pub async fn set_status<S, B>(app: &S, who: &Account, order_id: &str, status: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::put()
        .uri(&format!("/api/commandes/{order_id}/status"))
        .insert_header(bearer(&who.token))
        .set_json(json!({"status": status}))
        .to_request();
    send(app, req).await
}

pub async fn assign<S, B>(app: &S, livreur: &Account, order_id: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::put()
        .uri(&format!("/api/commandes/{order_id}/assign"))
        .insert_header(bearer(&livreur.token))
        .to_request();
    send(app, req).await
}

pub async fn get<S, B>(app: &S, who: Option<&Account>, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(who) = who {
        req = req.insert_header(bearer(&who.token));
    }
    send(app, req.to_request()).await
}

/// A merchant, a client and an order of 2 x 12.5 in PENDING
pub async fn pending_order<S, B>(app: &S) -> (Account, Account, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let merchant = register(app, "Chez Nadia", "COMMERCANT").await;
    let client = register(app, "Karim", "CLIENT").await;
    let product = create_product(app, &merchant, "Tajine", 12.5).await;

    let (status, body) =
        place_order(app, &client, &merchant, json!([{"productId": product, "quantity": 2}])).await;
    assert_eq!(status, StatusCode::CREATED, "order creation failed: {body}");
    (merchant, client, body["id"].as_str().unwrap().to_string())
}
