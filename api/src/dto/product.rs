use dm_core::services::NewProduct;
use serde::Deserialize;
use validator::Validate;

use super::present;
use crate::handlers::ApiError;

/// Body of `POST /api/produits`; the merchant is always the caller
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    pub description: Option<String>,

    /// Any number is accepted, including zero and negatives
    #[validate(required)]
    pub price: Option<f64>,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> Result<NewProduct, ApiError> {
        Ok(NewProduct {
            name: present(self.name, "name")?,
            description: self.description,
            price: present(self.price, "price")?,
            image_url: self.image_url,
        })
    }
}
