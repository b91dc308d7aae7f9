//! MySQL implementation of the OrderRepository trait.
//!
//! Conditional writes lock the first matching row with `SELECT ... FOR UPDATE`
//! inside a transaction. A concurrent writer blocks on that lock and then
//! re-reads the committed row, so it no longer matches once the first writer
//! has moved the order on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dm_core::domain::entities::order::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus};
use dm_core::errors::DomainError;
use dm_core::repositories::{OrderFilter, OrderRepository, OrderUpdate};

use super::{column, database_error, parse_enum, parse_uuid, point, POINT_FROM_WKT};

const ORDER_COLUMNS: &str = "id, client_id, merchant_id, livreur_id, items, total_amount, status, \
     payment_method, payment_status, delivery_fee, tip, commission, delivery_distance, \
     delivery_address, \
     ST_Longitude(client_location) AS client_lng, ST_Latitude(client_location) AS client_lat, \
     ST_Longitude(livreur_location) AS livreur_lng, ST_Latitude(livreur_location) AS livreur_lat, \
     created_at, updated_at";

/// MySQL implementation of OrderRepository
pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: &MySqlRow) -> Result<Order, DomainError> {
        let id: String = column(row, "id")?;
        let client_id: String = column(row, "client_id")?;
        let merchant_id: String = column(row, "merchant_id")?;
        let livreur_id: Option<String> = column(row, "livreur_id")?;
        let items: Json<Vec<OrderItem>> = column(row, "items")?;

        Ok(Order {
            id: parse_uuid(&id, "orders.id")?,
            client_id: parse_uuid(&client_id, "orders.client_id")?,
            merchant_id: parse_uuid(&merchant_id, "orders.merchant_id")?,
            livreur_id: livreur_id
                .as_deref()
                .map(|value| parse_uuid(value, "orders.livreur_id"))
                .transpose()?,
            items: items.0,
            total_amount: column(row, "total_amount")?,
            status: parse_enum::<OrderStatus>(row, "status")?,
            payment_method: parse_enum::<PaymentMethod>(row, "payment_method")?,
            payment_status: parse_enum::<PaymentStatus>(row, "payment_status")?,
            delivery_fee: column(row, "delivery_fee")?,
            tip: column(row, "tip")?,
            commission: column(row, "commission")?,
            delivery_distance: column(row, "delivery_distance")?,
            delivery_address: column(row, "delivery_address")?,
            client_location: point(row, "client")?,
            livreur_location: point(row, "livreur")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn fetch_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Order>, DomainError>
    where
        E: sqlx::Executor<'e, Database = MySql>,
    {
        let sql = format!("SELECT {} FROM orders WHERE id = ?", ORDER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(executor)
            .await
            .map_err(|e| database_error("Failed to fetch order", e))?;

        row.as_ref().map(Self::row_to_order).transpose()
    }
}

/// Append `WHERE` predicates for every field set on the filter
pub(crate) fn push_order_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &OrderFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(id) = filter.id {
        builder.push(" AND id = ").push_bind(id.to_string());
    }
    if !filter.statuses.is_empty() {
        builder.push(" AND status IN (");
        let mut separated = builder.separated(", ");
        for status in &filter.statuses {
            separated.push_bind(status.as_str());
        }
        separated.push_unseparated(")");
    }
    if let Some(client_id) = filter.client_id {
        builder.push(" AND client_id = ").push_bind(client_id.to_string());
    }
    if let Some(merchant_id) = filter.merchant_id {
        builder.push(" AND merchant_id = ").push_bind(merchant_id.to_string());
    }
    if let Some(livreur_id) = filter.livreur_id {
        builder.push(" AND livreur_id = ").push_bind(livreur_id.to_string());
    }
    if let Some(since) = filter.updated_since {
        builder.push(" AND updated_at >= ").push_bind(since);
    }
}

/// Build the `UPDATE` for one locked row; `updated_at` is always set
pub(crate) fn build_order_update<'a>(
    id: Uuid,
    update: &OrderUpdate,
    now: DateTime<Utc>,
) -> QueryBuilder<'a, MySql> {
    let mut builder = QueryBuilder::<MySql>::new("UPDATE orders SET updated_at = ");
    builder.push_bind(now);

    if let Some(status) = update.status {
        builder.push(", status = ").push_bind(status.as_str());
    }
    if let Some(livreur_id) = update.livreur_id {
        builder.push(", livreur_id = ").push_bind(livreur_id.to_string());
    }
    if let Some(location) = &update.livreur_location {
        builder
            .push(", livreur_location = ST_GeomFromText(")
            .push_bind(location.to_wkt())
            .push(", 4326, 'axis-order=long-lat')");
    }

    builder.push(" WHERE id = ").push_bind(id.to_string());
    builder
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO orders (
                id, client_id, merchant_id, livreur_id, items, total_amount, status,
                payment_method, payment_status, delivery_fee, tip, commission,
                delivery_distance, delivery_address, client_location, livreur_location,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, {point}, {point}, ?, ?)
            "#,
            point = POINT_FROM_WKT
        );

        sqlx::query(&sql)
            .bind(order.id.to_string())
            .bind(order.client_id.to_string())
            .bind(order.merchant_id.to_string())
            .bind(order.livreur_id.map(|id| id.to_string()))
            .bind(Json(&order.items))
            .bind(order.total_amount)
            .bind(order.status.as_str())
            .bind(order.payment_method.as_str())
            .bind(order.payment_status.as_str())
            .bind(order.delivery_fee)
            .bind(order.tip)
            .bind(order.commission)
            .bind(order.delivery_distance)
            .bind(&order.delivery_address)
            .bind(order.client_location.to_wkt())
            .bind(order.livreur_location.to_wkt())
            .bind(order.created_at)
            .bind(order.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to create order", e))?;

        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Self::fetch_by_id(&self.pool, id).await
    }

    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new(format!("SELECT {} FROM orders", ORDER_COLUMNS));
        push_order_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list orders", e))?;

        rows.iter().map(Self::row_to_order).collect()
    }

    async fn find_one_and_update(
        &self,
        filter: &OrderFilter,
        update: OrderUpdate,
    ) -> Result<Option<Order>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;

        let mut select = QueryBuilder::<MySql>::new("SELECT id FROM orders");
        push_order_filter(&mut select, filter);
        select.push(" ORDER BY created_at ASC LIMIT 1 FOR UPDATE");

        let locked = select
            .build()
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| database_error("Failed to lock order", e))?;

        let Some(row) = locked else {
            tx.rollback()
                .await
                .map_err(|e| database_error("Failed to roll back", e))?;
            return Ok(None);
        };

        let id: String = column(&row, "id")?;
        let id = parse_uuid(&id, "orders.id")?;

        build_order_update(id, &update, Utc::now())
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("Failed to update order", e))?;

        let order = Self::fetch_by_id(&mut *tx, id).await?;

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit order update", e))?;

        Ok(order)
    }
}
