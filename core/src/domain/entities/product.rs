//! Product entity offered by a merchant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Owning merchant
    #[serde(rename = "merchant")]
    pub merchant_id: Uuid,

    pub name: String,

    pub description: Option<String>,

    pub price: f64,

    pub image_url: Option<String>,

    /// Only available products are listed publicly
    pub is_available: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        merchant_id: Uuid,
        name: String,
        description: Option<String>,
        price: f64,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            merchant_id,
            name,
            description,
            price,
            image_url,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }
}
