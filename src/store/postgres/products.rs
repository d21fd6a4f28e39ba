use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::{NewProduct, Product, ProductQuantity, ProductsRepository};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, price, quantity, created_at, updated_at FROM products WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_all_by_id(&self, products: &[ProductQuantity]) -> Result<Vec<Product>> {
        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();

        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, price, quantity, created_at, updated_at
             FROM products WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(requested = ids.len(), found = rows.len(), "Looked up products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<()> {
        // UPDATE ... FROM applies an arbitrary row when an id repeats, so the
        // batch is collapsed to one entry per product first
        let (ids, quantities): (Vec<Uuid>, Vec<i32>) = ProductQuantity::last_per_id(products)
            .iter()
            .map(|p| (p.id, p.quantity))
            .unzip();

        let result = sqlx::query(
            "UPDATE products
             SET quantity = data.quantity, updated_at = now()
             FROM UNNEST($1::uuid[], $2::int4[]) AS data(id, quantity)
             WHERE products.id = data.id",
        )
        .bind(&ids)
        .bind(&quantities)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            requested = ids.len(),
            updated = result.rows_affected(),
            "Updated product stock"
        );
        Ok(())
    }

    async fn create(&self, data: NewProduct) -> Result<Product> {
        let row: ProductRow = sqlx::query_as(
            "INSERT INTO products (name, price, quantity) VALUES ($1, $2, $3)
             RETURNING id, name, price, quantity, created_at, updated_at",
        )
        .bind(&data.name)
        .bind(data.price)
        .bind(data.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_maps_to_product() {
        let now = Utc::now();
        let row = ProductRow {
            id: Uuid::new_v4(),
            name: "Keyboard".to_string(),
            price: dec!(49.90),
            quantity: 7,
            created_at: now,
            updated_at: now,
        };

        let product = Product::from(row);

        assert_eq!(product.price, dec!(49.90));
        assert_eq!(product.quantity, 7);
    }
}
