//! Earnings service implementation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::domain::entities::order::OrderStatus;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{DeliveryRecord, EarningsSummary};
use crate::errors::DomainResult;
use crate::repositories::{OrderFilter, OrderRepository, UserRepository};

use super::period::EarningsPeriod;

pub struct EarningsService<O, U>
where
    O: OrderRepository,
    U: UserRepository,
{
    order_repository: Arc<O>,
    user_repository: Arc<U>,
}

impl<O, U> EarningsService<O, U>
where
    O: OrderRepository,
    U: UserRepository,
{
    pub fn new(order_repository: Arc<O>, user_repository: Arc<U>) -> Self {
        Self {
            order_repository,
            user_repository,
        }
    }

    /// Earnings of a driver over a period measured in server local time
    pub async fn summary(
        &self,
        livreur_id: Uuid,
        period: Option<EarningsPeriod>,
    ) -> DomainResult<EarningsSummary> {
        let since = period.map(|period| period.start(&Local::now()));
        self.summary_since(livreur_id, since).await
    }

    /// Earnings of a driver over orders delivered at or after `since`
    pub async fn summary_since(
        &self,
        livreur_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> DomainResult<EarningsSummary> {
        let mut filter = OrderFilter::new()
            .with_livreur(livreur_id)
            .with_status(OrderStatus::Delivered);
        if let Some(since) = since {
            filter = filter.updated_since(since);
        }
        let orders = self.order_repository.find(&filter).await?;

        let mut user_ids: Vec<Uuid> = orders
            .iter()
            .flat_map(|order| [order.client_id, order.merchant_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users: HashMap<Uuid, User> = self
            .user_repository
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        let name_of = |id: &Uuid| users.get(id).map(|u| u.name.clone()).unwrap_or_default();

        let mut summary = EarningsSummary::default();
        for order in orders {
            summary.record(DeliveryRecord {
                order_id: order.id,
                customer_name: name_of(&order.client_id),
                restaurant: name_of(&order.merchant_id),
                amount: order.total_amount,
                tip: order.tip,
                distance: order.delivery_distance,
                time: order.updated_at,
            });
        }

        tracing::debug!(
            livreur_id = %livreur_id,
            deliveries = summary.total_deliveries,
            total = summary.total_earnings,
            "Computed driver earnings"
        );
        Ok(summary)
    }
}
