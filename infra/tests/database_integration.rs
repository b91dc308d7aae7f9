//! Integration tests against a live MySQL 8 instance.
//!
//! Run with `DATABASE_URL=mysql://... cargo test -p dm_infra -- --ignored`.

use std::sync::Arc;

use dm_core::domain::entities::order::{Order, OrderItem, OrderStatus, PaymentMethod};
use dm_core::domain::entities::product::Product;
use dm_core::domain::entities::user::{Role, User};
use dm_core::errors::{AuthError, DomainError};
use dm_core::repositories::{
    OrderFilter, OrderRepository, OrderUpdate, ProductRepository, UserRepository,
};
use dm_infra::{DatabasePool, MySqlOrderRepository, MySqlProductRepository, MySqlUserRepository};
use dm_shared::{DatabaseConfig, GeoPoint};
use uuid::Uuid;

async fn setup() -> DatabasePool {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let config = DatabaseConfig::from_env().with_max_connections(5);
    let pool = DatabasePool::new(config).await.expect("database should be reachable");
    pool.run_migrations().await.expect("migrations should apply");
    pool
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

fn sample_order(client_id: Uuid, merchant_id: Uuid) -> Order {
    let items = vec![OrderItem {
        product_id: Uuid::new_v4(),
        product_name: "Tajine".to_string(),
        quantity: 2,
        price: 12.5,
    }];
    Order::new(
        client_id,
        merchant_id,
        items,
        PaymentMethod::Cash,
        "12 Rue des Lilas".to_string(),
        Some(GeoPoint::new(-7.6, 33.57)),
    )
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_user_round_trip_and_duplicate_email() {
    let pool = setup().await;
    let repo = MySqlUserRepository::new(pool.get_pool().clone());

    let email = unique_email("client");
    let user = User::new(
        "Amina".to_string(),
        email.clone(),
        "$2b$04$hash".to_string(),
        Role::Client,
        Some("0600000000".to_string()),
    );
    repo.create(user.clone()).await.unwrap();

    let found = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.role, Role::Client);
    assert!(found.is_approved);
    assert_eq!(found.location, GeoPoint::origin());

    let duplicate = User::new(
        "Other".to_string(),
        email.clone(),
        "$2b$04$hash".to_string(),
        Role::Client,
        None,
    );
    let err = repo.create(duplicate).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyInUse)));

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_update_of_missing_user_is_not_found() {
    let pool = setup().await;
    let repo = MySqlUserRepository::new(pool.get_pool().clone());

    let ghost = User::new(
        "Ghost".to_string(),
        unique_email("ghost"),
        "hash".to_string(),
        Role::Livreur,
        None,
    );
    let err = repo.update(ghost).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_available_products_only() {
    let pool = setup().await;
    let repo = MySqlProductRepository::new(pool.get_pool().clone());

    let listed = Product::new(Uuid::new_v4(), "Couscous".to_string(), None, 9.0, None);
    let mut hidden = Product::new(Uuid::new_v4(), "Hidden".to_string(), None, 3.0, None);
    hidden.is_available = false;

    repo.create(listed.clone()).await.unwrap();
    repo.create(hidden.clone()).await.unwrap();

    let available = repo.list_available().await.unwrap();
    assert!(available.iter().any(|p| p.id == listed.id));
    assert!(!available.iter().any(|p| p.id == hidden.id));
    assert!(repo.find_by_id(hidden.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_order_items_and_points_survive_storage() {
    let pool = setup().await;
    let repo = MySqlOrderRepository::new(pool.get_pool().clone());

    let order = sample_order(Uuid::new_v4(), Uuid::new_v4());
    repo.create(order.clone()).await.unwrap();

    let stored = repo.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.items, order.items);
    assert_eq!(stored.total_amount, 25.0);
    assert_eq!(stored.status, OrderStatus::Pending);
    assert!((stored.client_location.longitude() + 7.6).abs() < 1e-9);
    assert!((stored.client_location.latitude() - 33.57).abs() < 1e-9);
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_concurrent_assignment_has_single_winner() {
    let pool = setup().await;
    let repo = Arc::new(MySqlOrderRepository::new(pool.get_pool().clone()));

    let mut order = sample_order(Uuid::new_v4(), Uuid::new_v4());
    order.status = OrderStatus::Accepted;
    repo.create(order.clone()).await.unwrap();

    let filter = OrderFilter::by_id(order.id).with_status(OrderStatus::Accepted);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let repo = repo.clone();
        let filter = filter.clone();
        handles.push(tokio::spawn(async move {
            repo.find_one_and_update(&filter, OrderUpdate::assign(Uuid::new_v4()))
                .await
                .unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let stored = repo.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Assigned);
    assert!(stored.livreur_id.is_some());
}
