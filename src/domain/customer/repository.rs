use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Customer, NewCustomer};
use super::value_objects::Email;

#[async_trait]
pub trait CustomersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>>;

    async fn create(&self, data: NewCustomer) -> Result<Customer>;
}
