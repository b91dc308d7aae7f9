use dm_core::domain::entities::order::{OrderStatus, PaymentMethod};
use dm_core::errors::ValidationError;
use dm_core::services::{NewOrder, OrderLine};
use dm_shared::LatLng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::present;
use crate::handlers::ApiError;

/// Body of `POST /api/commandes`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[serde(rename = "merchantId")]
    #[validate(required, length(min = 1))]
    pub merchant_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub items: Option<Vec<OrderLineRequest>>,

    /// ONLINE or CASH
    #[serde(rename = "paymentMethod")]
    #[validate(required)]
    pub payment_method: Option<String>,

    #[serde(rename = "deliveryAddress")]
    #[validate(required, length(min = 1))]
    pub delivery_address: Option<String>,

    #[serde(rename = "clientLocation")]
    #[validate(nested)]
    pub client_location: Option<LocationRequest>,
}

/// Client-sent names and prices are ignored; only the id and quantity count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    #[serde(rename = "productId", default)]
    pub product_id: String,
    pub quantity: Option<u32>,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> Result<NewOrder, ApiError> {
        let merchant_id = present(self.merchant_id, "merchantId")?;
        let merchant_id = Uuid::parse_str(merchant_id.trim()).map_err(|_| {
            ValidationError::InvalidFormat {
                field: "merchantId".to_string(),
            }
        })?;
        let payment_method: PaymentMethod = present(self.payment_method, "paymentMethod")?.parse()?;

        let items = present(self.items, "items")?
            .into_iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect();

        let client_location = self
            .client_location
            .as_ref()
            .map(LocationRequest::lat_lng)
            .transpose()?;

        Ok(NewOrder {
            merchant_id,
            items,
            payment_method,
            delivery_address: present(self.delivery_address, "deliveryAddress")?,
            client_location,
        })
    }
}

/// Body of `PUT /api/commandes/{id}/status`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

impl StatusRequest {
    /// A missing status is reported like an unknown one
    pub fn status(&self) -> Result<OrderStatus, ApiError> {
        let status = self.status.as_deref().ok_or(ValidationError::InvalidStatus)?;
        Ok(status.parse()?)
    }
}

/// Body of `PUT /api/commandes/{id}/location`, also the order's `clientLocation`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationRequest {
    #[validate(required, range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
}

impl LocationRequest {
    pub fn lat_lng(&self) -> Result<LatLng, ApiError> {
        Ok(LatLng {
            lat: present(self.lat, "lat")?,
            lng: present(self.lng, "lng")?,
        })
    }
}
