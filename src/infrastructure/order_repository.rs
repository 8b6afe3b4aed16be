// ============================================================================
// Order Persistence
// ============================================================================
//
// An order is stored as one `orders` row plus one `order_items` row per
// item. Both writes happen inside a single transaction so a rejected item
// (unknown product, duplicate id) leaves no half-written order behind.
// `update` rewrites the header, customer reference included, and replaces
// every item row.
//
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::domain::order::{Order, OrderItem, OrderRepository};
use crate::metrics::Metrics;
use crate::shared::{Repository, RepositoryError};
use super::db::{column_to_u32, corrupted, observe};

const AGGREGATE: &str = "Order";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    total: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    product_id: String,
    name: String,
    price: f64,
    quantity: i64,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let quantity = column_to_u32("quantity", row.quantity)?;
        OrderItem::new(row.id.as_str(), row.name, row.price, row.product_id, quantity)
            .map_err(|e| corrupted("OrderItem", &row.id, e))
    }
}

/// Rebuild the aggregate from its header row and its item rows
fn assemble(row: OrderRow, item_rows: Vec<OrderItemRow>) -> Result<Order, RepositoryError> {
    let items = item_rows
        .into_iter()
        .map(OrderItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let order = Order::new(row.id.as_str(), row.customer_id, items)
        .map_err(|e| corrupted(AGGREGATE, &row.id, e))?;

    if (order.total() - row.total).abs() > f64::EPSILON * order.total().abs().max(1.0) {
        tracing::warn!(
            order_id = %order.id(),
            stored_total = row.total,
            computed_total = order.total(),
            "Stored order total differs from items"
        );
    }

    Ok(order)
}

async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    order: &Order,
) -> Result<(), RepositoryError> {
    for (position, item) in order.items().iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, product_id, name, price, quantity, position)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id())
        .bind(order.id())
        .bind(item.product_id())
        .bind(item.name())
        .bind(item.price())
        .bind(i64::from(item.quantity()))
        .bind(position as i64)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

pub struct SqlOrderRepository {
    pool: SqlitePool,
    metrics: Arc<Metrics>,
}

impl SqlOrderRepository {
    pub fn new(pool: SqlitePool, metrics: Arc<Metrics>) -> Self {
        Self { pool, metrics }
    }

    async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES (?, ?, ?)")
            .bind(order.id())
            .bind(order.customer_id())
            .bind(order.total())
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id(),
            customer_id = %order.customer_id(),
            item_count = order.items().len(),
            total = order.total(),
            "Created order"
        );

        Ok(())
    }

    async fn rewrite(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE orders SET customer_id = ?, total = ? WHERE id = ?")
            .bind(order.customer_id())
            .bind(order.total())
            .bind(order.id())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            tracing::warn!(order_id = %order.id(), "Update of unknown order");
            return Err(RepositoryError::not_found(AGGREGATE, order.id()));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(order.id())
            .execute(&mut *tx)
            .await?;

        insert_items(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id(),
            customer_id = %order.customer_id(),
            item_count = order.items().len(),
            total = order.total(),
            "Updated order"
        );

        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, total FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found(AGGREGATE, id))?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_id, name, price, quantity
             FROM order_items
             WHERE order_id = ?
             ORDER BY position ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(order_id = %id, item_count = item_rows.len(), "Loaded order");
        assemble(row, item_rows)
    }

    async fn fetch_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>("SELECT id, customer_id, total FROM orders")
            .fetch_all(&self.pool)
            .await?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_id, name, price, quantity
             FROM order_items
             ORDER BY order_id ASC, position ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<OrderItemRow>> = HashMap::new();
        for item_row in item_rows {
            items_by_order
                .entry(item_row.order_id.clone())
                .or_default()
                .push(item_row);
        }

        tracing::debug!(count = rows.len(), "Loaded orders");

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                assemble(row, items)
            })
            .collect()
    }
}

#[async_trait]
impl Repository<Order> for SqlOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        observe(&self.metrics, AGGREGATE, "create", self.insert(order)).await
    }

    async fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        observe(&self.metrics, AGGREGATE, "update", self.rewrite(order)).await
    }

    async fn find(&self, id: &str) -> Result<Order, RepositoryError> {
        observe(&self.metrics, AGGREGATE, "find", self.fetch(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        observe(&self.metrics, AGGREGATE, "find_all", self.fetch_all()).await
    }
}

impl OrderRepository for SqlOrderRepository {}

// ============================================================================
// Unit Tests
// ============================================================================
