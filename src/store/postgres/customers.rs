use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomersRepository, Email, NewCustomer};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: Email(row.email),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgCustomersRepository {
    pool: PgPool,
}

impl PgCustomersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomersRepository for PgCustomersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, created_at, updated_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        tracing::debug!(customer_id = %id, found = row.is_some(), "Looked up customer");
        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, created_at, updated_at FROM customers WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn create(&self, data: NewCustomer) -> Result<Customer> {
        let row: CustomerRow = sqlx::query_as(
            "INSERT INTO customers (name, email) VALUES ($1, $2)
             RETURNING id, name, email, created_at, updated_at",
        )
        .bind(&data.name)
        .bind(data.email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
