//! Order representations returned by the order endpoints.

use chrono::{DateTime, Utc};
use dm_shared::GeoPoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderItem, OrderStatus, PaymentMethod};
use crate::domain::entities::user::User;

/// `{id, name}` reference to a joined user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartyRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&User> for PartyRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// Client reference, including a phone number for the driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRef {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
}

impl From<&User> for ClientRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// An order joined with its merchant and client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub merchant: Option<PartyRef>,
    pub client: Option<ClientRef>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderView {
    pub fn new(order: Order, merchant: Option<&User>, client: Option<&User>) -> Self {
        Self {
            id: order.id,
            merchant_id: order.merchant_id,
            merchant: merchant.map(PartyRef::from),
            client: client.map(ClientRef::from),
            items: order.items,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            delivery_address: order.delivery_address,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Live position of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub client_location: GeoPoint,
    pub livreur_location: GeoPoint,
    pub livreur: Option<PartyRef>,
    pub updated_at: DateTime<Utc>,
}

impl TrackingView {
    pub fn new(order: &Order, livreur: Option<&User>) -> Self {
        Self {
            order_id: order.id,
            status: order.status,
            client_location: order.client_location,
            livreur_location: order.livreur_location,
            livreur: livreur.map(PartyRef::from),
            updated_at: order.updated_at,
        }
    }
}
