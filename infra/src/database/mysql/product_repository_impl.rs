//! MySQL implementation of the ProductRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use dm_core::domain::entities::product::Product;
use dm_core::errors::DomainError;
use dm_core::repositories::ProductRepository;

use super::{column, database_error, parse_uuid};

const PRODUCT_COLUMNS: &str =
    "id, merchant_id, name, description, price, image_url, is_available, created_at, updated_at";

/// MySQL implementation of ProductRepository
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &MySqlRow) -> Result<Product, DomainError> {
        let id: String = column(row, "id")?;
        let merchant_id: String = column(row, "merchant_id")?;

        Ok(Product {
            id: parse_uuid(&id, "products.id")?,
            merchant_id: parse_uuid(&merchant_id, "products.merchant_id")?,
            name: column(row, "name")?,
            description: column(row, "description")?,
            price: column(row, "price")?,
            image_url: column(row, "image_url")?,
            is_available: column(row, "is_available")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, merchant_id, name, description, price, image_url,
                is_available, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id.to_string())
        .bind(product.merchant_id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.is_available)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to create product", e))?;

        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let sql = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to fetch product", e))?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn list_available(&self) -> Result<Vec<Product>, DomainError> {
        let sql = format!(
            "SELECT {} FROM products WHERE is_available = TRUE ORDER BY created_at ASC",
            PRODUCT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list products", e))?;

        rows.iter().map(Self::row_to_product).collect()
    }
}
