//! Declarative order predicates and partial updates.
//!
//! The same `OrderFilter` value is evaluated in memory by the mock repository
//! and translated to a `WHERE` clause by the MySQL repository, so a conditional
//! write carries its whole precondition in one statement.

use chrono::{DateTime, Utc};
use dm_shared::GeoPoint;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderStatus};

/// Conjunction of optional predicates over an order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub id: Option<Uuid>,
    /// Any of these statuses; empty means any status
    pub statuses: Vec<OrderStatus>,
    pub client_id: Option<Uuid>,
    pub merchant_id: Option<Uuid>,
    pub livreur_id: Option<Uuid>,
    /// Inclusive lower bound on `updated_at`
    pub updated_since: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.statuses = vec![status];
        self
    }

    pub fn with_statuses(mut self, statuses: &[OrderStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_merchant(mut self, merchant_id: Uuid) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    pub fn with_livreur(mut self, livreur_id: Uuid) -> Self {
        self.livreur_id = Some(livreur_id);
        self
    }

    pub fn updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }

    /// Evaluate the filter against an order
    pub fn matches(&self, order: &Order) -> bool {
        self.id.map_or(true, |id| order.id == id)
            && (self.statuses.is_empty() || self.statuses.contains(&order.status))
            && self.client_id.map_or(true, |id| order.client_id == id)
            && self.merchant_id.map_or(true, |id| order.merchant_id == id)
            && self
                .livreur_id
                .map_or(true, |id| order.livreur_id == Some(id))
            && self
                .updated_since
                .map_or(true, |since| order.updated_at >= since)
    }
}

/// Fields set by a conditional write; `updated_at` is always refreshed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub livreur_id: Option<Uuid>,
    pub livreur_location: Option<GeoPoint>,
}

impl OrderUpdate {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn assign(livreur_id: Uuid) -> Self {
        Self {
            status: Some(OrderStatus::Assigned),
            livreur_id: Some(livreur_id),
            livreur_location: None,
        }
    }

    pub fn livreur_location(location: GeoPoint) -> Self {
        Self {
            livreur_location: Some(location),
            ..Self::default()
        }
    }

    /// Apply the update in place
    pub fn apply(&self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(livreur_id) = self.livreur_id {
            order.livreur_id = Some(livreur_id);
        }
        if let Some(location) = self.livreur_location {
            order.livreur_location = location;
        }
        order.updated_at = now;
    }
}
