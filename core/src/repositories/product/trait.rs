//! Product repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::product::Product;
use crate::errors::DomainError;

/// Repository trait for catalog persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn create(&self, product: Product) -> Result<Product, DomainError>;

    /// Find a product by id, available or not
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;

    /// All products flagged available, oldest first
    async fn list_available(&self) -> Result<Vec<Product>, DomainError>;
}
