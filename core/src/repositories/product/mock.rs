//! Mock implementation of ProductRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::product::Product;
use crate::errors::DomainError;

use super::trait_::ProductRepository;

/// In-memory product repository
#[derive(Clone)]
pub struct MockProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list_available(&self) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().await;
        let mut available: Vec<Product> = products
            .values()
            .filter(|p| p.is_available)
            .cloned()
            .collect();
        available.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(available)
    }
}
