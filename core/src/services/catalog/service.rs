//! Catalog service implementation

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::product::Product;
use crate::domain::entities::user::User;
use crate::domain::value_objects::ProductView;
use crate::errors::DomainResult;
use crate::repositories::{ProductRepository, UserRepository};

/// Fields a merchant supplies for a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

pub struct CatalogService<P, U>
where
    P: ProductRepository,
    U: UserRepository,
{
    product_repository: Arc<P>,
    user_repository: Arc<U>,
}

impl<P, U> CatalogService<P, U>
where
    P: ProductRepository,
    U: UserRepository,
{
    pub fn new(product_repository: Arc<P>, user_repository: Arc<U>) -> Self {
        Self {
            product_repository,
            user_repository,
        }
    }

    /// Available products with their merchant joined in
    pub async fn list_available(&self) -> DomainResult<Vec<ProductView>> {
        let products = self.product_repository.list_available().await?;

        let mut merchant_ids: Vec<Uuid> = products.iter().map(|p| p.merchant_id).collect();
        merchant_ids.sort_unstable();
        merchant_ids.dedup();
        let merchants: HashMap<Uuid, User> = self
            .user_repository
            .find_by_ids(&merchant_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(products
            .into_iter()
            .map(|product| {
                let merchant = merchants.get(&product.merchant_id);
                ProductView::new(product, merchant)
            })
            .collect())
    }

    /// Create a product owned by the calling merchant
    pub async fn create_product(&self, merchant_id: Uuid, input: NewProduct) -> DomainResult<Product> {
        let product = Product::new(
            merchant_id,
            input.name,
            input.description,
            input.price,
            input.image_url,
        );
        let product = self.product_repository.create(product).await?;

        tracing::info!(
            product_id = %product.id,
            merchant_id = %merchant_id,
            event = "product_created",
            "Product added to catalog"
        );
        Ok(product)
    }
}
