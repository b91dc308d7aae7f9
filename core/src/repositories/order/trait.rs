//! Order repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::order::Order;
use crate::errors::DomainError;

use super::filter::{OrderFilter, OrderUpdate};

/// Repository trait for order persistence
///
/// `find_one_and_update` is the only way an existing order changes. It must
/// evaluate the filter and apply the update atomically, so that of two
/// concurrent writers with the same precondition at most one succeeds.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order
    async fn create(&self, order: Order) -> Result<Order, DomainError>;

    /// Find an order by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;

    /// All orders matching the filter, oldest first
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>, DomainError>;

    /// Atomically apply `update` to one order matching `filter`
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - The order after the update
    /// * `Ok(None)` - No order satisfied the filter at write time
    async fn find_one_and_update(
        &self,
        filter: &OrderFilter,
        update: OrderUpdate,
    ) -> Result<Option<Order>, DomainError>;
}
