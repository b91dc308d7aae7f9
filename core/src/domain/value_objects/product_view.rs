//! Catalog listing entry with its merchant joined in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{product::Product, user::User};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// `null` when the merchant account no longer exists
    pub merchant: Option<MerchantRef>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductView {
    pub fn new(product: Product, merchant: Option<&User>) -> Self {
        Self {
            id: product.id,
            merchant: merchant.map(|user| MerchantRef {
                id: user.id,
                name: user.name.clone(),
            }),
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            is_available: product.is_available,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
