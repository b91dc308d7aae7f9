//! Order service implementation

use std::collections::HashMap;
use std::sync::Arc;

use dm_shared::{GeoPoint, LatLng};
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderItem, OrderStatus, PaymentMethod};
use crate::domain::entities::user::User;
use crate::domain::value_objects::{Caller, OrderView, TrackingView};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{OrderFilter, OrderRepository, OrderUpdate, ProductRepository, UserRepository};

use super::transitions::rule_for;

const INVALID_TRANSITION: &str = "Order not found or invalid status transition";
const NOT_AVAILABLE: &str = "Order not found or not available for assignment";
const NOT_DELIVERING: &str = "Order not found or not being delivered by you";

/// A requested line item; the product id is resolved server-side
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: String,
    /// Missing or zero means one
    pub quantity: Option<u32>,
}

/// Input for placing an order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub merchant_id: Uuid,
    pub items: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub client_location: Option<LatLng>,
}

/// Order lifecycle service
pub struct OrderService<O, P, U>
where
    O: OrderRepository,
    P: ProductRepository,
    U: UserRepository,
{
    order_repository: Arc<O>,
    product_repository: Arc<P>,
    user_repository: Arc<U>,
}

impl<O, P, U> OrderService<O, P, U>
where
    O: OrderRepository,
    P: ProductRepository,
    U: UserRepository,
{
    pub fn new(order_repository: Arc<O>, product_repository: Arc<P>, user_repository: Arc<U>) -> Self {
        Self {
            order_repository,
            product_repository,
            user_repository,
        }
    }

    /// Place an order for `client_id`
    ///
    /// Prices and names are read from the catalog at this moment; client-sent
    /// values are never trusted. Lines whose product cannot be resolved are
    /// dropped, so the order may end up empty with a zero total.
    pub async fn create(&self, client_id: Uuid, input: NewOrder) -> DomainResult<OrderView> {
        if input.items.is_empty() {
            return Err(ValidationError::missing("items").into());
        }
        if input.delivery_address.trim().is_empty() {
            return Err(ValidationError::missing("deliveryAddress").into());
        }

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let Ok(product_id) = Uuid::parse_str(&line.product_id) else {
                tracing::debug!(product_id = %line.product_id, "Skipping line with malformed product id");
                continue;
            };
            let Some(product) = self.product_repository.find_by_id(product_id).await? else {
                tracing::debug!(product_id = %product_id, "Skipping line with unknown product");
                continue;
            };

            items.push(OrderItem {
                product_id: product.id,
                product_name: product.name,
                quantity: line.quantity.filter(|quantity| *quantity > 0).unwrap_or(1),
                price: product.price,
            });
        }

        let order = Order::new(
            client_id,
            input.merchant_id,
            items,
            input.payment_method,
            input.delivery_address,
            input.client_location.map(GeoPoint::from),
        );
        let order = self.order_repository.create(order).await?;

        tracing::info!(
            order_id = %order.id,
            client_id = %client_id,
            merchant_id = %order.merchant_id,
            items = order.items.len(),
            total = order.total_amount,
            event = "order_created",
            "Order placed"
        );

        let mut views = self.views(vec![order]).await?;
        views
            .pop()
            .ok_or_else(|| DomainError::internal("Order could not be loaded after creation"))
    }

    /// Orders placed by a client
    pub async fn list_for_client(&self, client_id: Uuid) -> DomainResult<Vec<OrderView>> {
        let orders = self
            .order_repository
            .find(&OrderFilter::new().with_client(client_id))
            .await?;
        self.views(orders).await
    }

    /// Orders accepted by a merchant and waiting for a driver
    pub async fn list_available(&self) -> DomainResult<Vec<OrderView>> {
        let orders = self
            .order_repository
            .find(&OrderFilter::new().with_status(OrderStatus::Accepted))
            .await?;
        self.views(orders).await
    }

    /// Orders assigned to a driver, in any status
    pub async fn list_for_driver(&self, livreur_id: Uuid) -> DomainResult<Vec<OrderView>> {
        let orders = self
            .order_repository
            .find(&OrderFilter::new().with_livreur(livreur_id))
            .await?;
        self.views(orders).await
    }

    /// Move an order to `status` on behalf of `caller`
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::TransitionNotAllowed)` - The caller's role never reaches `status`
    /// * `Err(DomainError::PreconditionFailed)` - The order is missing, outside the
    ///   caller's scope, or not in a permitted prior status at write time
    pub async fn update_status(
        &self,
        caller: Caller,
        order_id: Uuid,
        status: OrderStatus,
    ) -> DomainResult<OrderView> {
        let rule = rule_for(caller.role, status).ok_or_else(|| AuthError::TransitionNotAllowed {
            role: caller.role.to_string(),
            status: status.to_string(),
        })?;

        let filter = rule.filter(order_id, &caller);
        let Some(order) = self
            .order_repository
            .find_one_and_update(&filter, OrderUpdate::status(status))
            .await?
        else {
            return Err(DomainError::PreconditionFailed {
                message: INVALID_TRANSITION.to_string(),
            });
        };

        tracing::info!(
            order_id = %order.id,
            user_id = %caller.user_id,
            role = %caller.role,
            status = %status,
            event = "order_status_changed",
            "Order status updated"
        );

        let mut views = self.views(vec![order]).await?;
        views
            .pop()
            .ok_or_else(|| DomainError::internal("Updated order could not be loaded"))
    }

    /// Claim an ACCEPTED order for a driver
    ///
    /// The status check happens in the same write as the assignment, so
    /// concurrent claims on one order have a single winner.
    pub async fn assign(&self, livreur_id: Uuid, order_id: Uuid) -> DomainResult<OrderView> {
        let filter = OrderFilter::by_id(order_id).with_status(OrderStatus::Accepted);
        let Some(order) = self
            .order_repository
            .find_one_and_update(&filter, OrderUpdate::assign(livreur_id))
            .await?
        else {
            return Err(DomainError::PreconditionFailed {
                message: NOT_AVAILABLE.to_string(),
            });
        };

        tracing::info!(
            order_id = %order.id,
            livreur_id = %livreur_id,
            event = "order_assigned",
            "Order assigned to driver"
        );

        let mut views = self.views(vec![order]).await?;
        views
            .pop()
            .ok_or_else(|| DomainError::internal("Assigned order could not be loaded"))
    }

    /// Positions and status of an order
    pub async fn track(&self, order_id: Uuid) -> DomainResult<TrackingView> {
        let order = self
            .order_repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?;
        self.tracking_view(&order).await
    }

    /// Record the assigned driver's position while the order is underway
    pub async fn update_driver_location(
        &self,
        livreur_id: Uuid,
        order_id: Uuid,
        location: LatLng,
    ) -> DomainResult<TrackingView> {
        let filter = OrderFilter::by_id(order_id)
            .with_statuses(&[OrderStatus::Assigned, OrderStatus::OnTheWay])
            .with_livreur(livreur_id);
        let Some(order) = self
            .order_repository
            .find_one_and_update(&filter, OrderUpdate::livreur_location(location.into()))
            .await?
        else {
            return Err(DomainError::PreconditionFailed {
                message: NOT_DELIVERING.to_string(),
            });
        };

        tracing::debug!(order_id = %order.id, livreur_id = %livreur_id, "Driver location updated");
        self.tracking_view(&order).await
    }

    async fn tracking_view(&self, order: &Order) -> DomainResult<TrackingView> {
        let livreur = match order.livreur_id {
            Some(id) => self.user_repository.find_by_id(id).await?,
            None => None,
        };
        Ok(TrackingView::new(order, livreur.as_ref()))
    }

    /// Join merchants and clients into order views with one user lookup
    async fn views(&self, orders: Vec<Order>) -> DomainResult<Vec<OrderView>> {
        let mut user_ids: Vec<Uuid> = orders
            .iter()
            .flat_map(|order| [order.merchant_id, order.client_id])
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

        Ok(orders
            .into_iter()
            .map(|order| {
                let merchant = users.get(&order.merchant_id);
                let client = users.get(&order.client_id);
                OrderView::new(order, merchant, client)
            })
            .collect())
    }
}
