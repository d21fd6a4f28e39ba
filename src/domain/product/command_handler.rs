use std::sync::Arc;
use anyhow::Result;
use rust_decimal::Decimal;

use crate::domain::errors::app_bail;

use super::entities::{NewProduct, Product};
use super::repository::ProductsRepository;

// ============================================================================
// Product Command Handler
// ============================================================================

pub struct ProductCommandHandler {
    products: Arc<dyn ProductsRepository>,
}

impl ProductCommandHandler {
    pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
        Self { products }
    }

    /// Add a product to the catalogue; names are unique
    pub async fn create_product(&self, name: &str, price: Decimal, quantity: i32) -> Result<Product> {
        let name = name.trim();
        if name.is_empty() {
            app_bail!("Product name cannot be empty");
        }
        if price.is_sign_negative() {
            app_bail!("Invalid product price: {}", price);
        }
        if quantity < 0 {
            app_bail!("Invalid product quantity: {}", quantity);
        }

        if self.products.find_by_name(name).await?.is_some() {
            tracing::warn!(name = %name, "Rejected product with duplicate name");
            app_bail!("There is already a product with this name");
        }

        let product = self
            .products
            .create(NewProduct {
                name: name.to_string(),
                price,
                quantity,
            })
            .await?;

        tracing::info!(
            product_id = %product.id,
            price = %product.price,
            quantity = product.quantity,
            "✅ Product created"
        );

        Ok(product)
    }
}
