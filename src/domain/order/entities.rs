use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::customer::Customer;
use super::value_objects::NewOrderProduct;

// ============================================================================
// Order Entities
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub id: Uuid,
    /// None once the customer has been deleted (ON DELETE SET NULL)
    pub customer_id: Option<Uuid>,
    pub order_products: Vec<OrderProduct>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn total(&self) -> Decimal {
        self.order_products
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum()
    }
}

/// A persisted order line. `price` is the unit price at the time of ordering
/// and is never re-read from the product.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderProduct {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: Customer,
    pub products: Vec<NewOrderProduct>,
}
