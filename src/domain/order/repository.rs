use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{NewOrder, Order};

#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist the order and all of its lines, returning them with the ids
    /// the store assigned
    async fn create(&self, data: NewOrder) -> Result<Order>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>>;
}
