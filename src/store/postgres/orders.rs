use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::{NewOrder, Order, OrderProduct, OrdersRepository};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderProductRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderProductRow> for OrderProduct {
    fn from(row: OrderProductRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            price: row.price,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderProductRow>) -> Order {
        Order {
            id: self.id,
            customer_id: self.customer_id,
            order_products: lines.into_iter().map(OrderProduct::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create(&self, data: NewOrder) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        let order: OrderRow = sqlx::query_as(
            "INSERT INTO orders (customer_id) VALUES ($1)
             RETURNING id, customer_id, created_at, updated_at",
        )
        .bind(data.customer.id)
        .fetch_one(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(data.products.len());
        for (line_number, line) in data.products.iter().enumerate() {
            let row: OrderProductRow = sqlx::query_as(
                "INSERT INTO orders_products (order_id, product_id, price, quantity, line_number)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, order_id, product_id, price, quantity, created_at, updated_at",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.price)
            .bind(line.quantity)
            .bind(line_number as i32)
            .fetch_one(&mut *tx)
            .await?;
            lines.push(row);
        }

        tx.commit().await?;

        tracing::debug!(
            order_id = %order.id,
            line_count = lines.len(),
            "Inserted order and lines"
        );

        Ok(order.into_order(lines))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        let order: Option<OrderRow> = sqlx::query_as(
            "SELECT id, customer_id, created_at, updated_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines: Vec<OrderProductRow> = sqlx::query_as(
            "SELECT id, order_id, product_id, price, quantity, created_at, updated_at
             FROM orders_products WHERE order_id = $1 ORDER BY line_number",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(order.into_order(lines)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rows_map_to_order() {
        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();
        let order = OrderRow {
            id: order_id,
            customer_id: None,
            created_at: now,
            updated_at: now,
        };
        let line = OrderProductRow {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            price: dec!(20.00),
            quantity: 1,
            created_at: now,
            updated_at: now,
        };

        let order = order.into_order(vec![line]);

        assert_eq!(order.customer_id, None);
        assert_eq!(order.order_products.len(), 1);
        assert_eq!(order.order_products[0].product_id, product_id);
        assert_eq!(order.order_products[0].price, dec!(20.00));
    }
}
