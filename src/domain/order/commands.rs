use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::ProductQuantity;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

/// Place an order for `customer_id`. Each entry of `products` names a product
/// and the quantity wanted, which must be positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    pub customer_id: Uuid,
    pub products: Vec<ProductQuantity>,
}
