//! Mock implementation of OrderRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::order::Order;
use crate::errors::DomainError;

use super::filter::{OrderFilter, OrderUpdate};
use super::trait_::OrderRepository;

/// In-memory order repository; conditional updates run under the write lock
#[derive(Clone)]
pub struct MockOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching)
    }

    async fn find_one_and_update(
        &self,
        filter: &OrderFilter,
        update: OrderUpdate,
    ) -> Result<Option<Order>, DomainError> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.values_mut().find(|order| filter.matches(order)) else {
            return Ok(None);
        };
        update.apply(order, Utc::now());
        Ok(Some(order.clone()))
    }
}
