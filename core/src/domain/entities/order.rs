//! Order entity and its lifecycle enums.

use chrono::{DateTime, Utc};
use dm_shared::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

/// Lifecycle state of an order
///
/// PENDING → ACCEPTED → ASSIGNED → ON_THE_WAY → DELIVERED, with CANCELLED as the
/// failure exit. DELIVERED and CANCELLED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Assigned,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Assigned,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Assigned => "ASSIGNED",
            OrderStatus::OnTheWay => "ON_THE_WAY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ValidationError::InvalidStatus)
    }
}

/// How the client pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Online,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "ONLINE",
            PaymentMethod::Cash => "CASH",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONLINE" => Ok(PaymentMethod::Online),
            "CASH" => Ok(PaymentMethod::Cash),
            _ => Err(ValidationError::InvalidPaymentMethod {
                value: s.to_string(),
            }),
        }
    }
}

/// Payment state; recorded but never transitioned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "FAILED" => Ok(PaymentStatus::Failed),
            _ => Err(ValidationError::InvalidFormat {
                field: "paymentStatus".to_string(),
            }),
        }
    }
}

/// Snapshot of a product taken when the order was placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at order time
    pub price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub merchant_id: Uuid,
    /// Assigned delivery driver
    pub livreur_id: Option<Uuid>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_fee: f64,
    pub tip: f64,
    pub commission: f64,
    pub delivery_distance: f64,
    pub delivery_address: String,
    pub client_location: GeoPoint,
    pub livreur_location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a PENDING order whose total is computed from the item snapshots
    pub fn new(
        client_id: Uuid,
        merchant_id: Uuid,
        items: Vec<OrderItem>,
        payment_method: PaymentMethod,
        delivery_address: String,
        client_location: Option<GeoPoint>,
    ) -> Self {
        let now = Utc::now();
        let total_amount = items.iter().map(OrderItem::subtotal).sum();
        Self {
            id: Uuid::new_v4(),
            client_id,
            merchant_id,
            livreur_id: None,
            items,
            total_amount,
            status: OrderStatus::Pending,
            payment_method,
            payment_status: PaymentStatus::default(),
            delivery_fee: 0.0,
            tip: 0.0,
            commission: 0.0,
            delivery_distance: 0.0,
            delivery_address,
            client_location: client_location.unwrap_or_default(),
            livreur_location: GeoPoint::origin(),
            created_at: now,
            updated_at: now,
        }
    }
}
