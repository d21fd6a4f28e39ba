use anyhow::Result;
use async_trait::async_trait;

use super::entities::{NewProduct, Product};
use super::value_objects::ProductQuantity;

#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>>;

    /// Fetch every product whose id appears in `products`, in a single query.
    /// Ids that match nothing are simply absent from the result.
    async fn find_all_by_id(&self, products: &[ProductQuantity]) -> Result<Vec<Product>>;

    /// Set each listed product's stock to the given absolute quantity
    async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<()>;

    async fn create(&self, data: NewProduct) -> Result<Product>;
}
