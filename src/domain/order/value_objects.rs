use serde::{Deserialize, Serialize};
use uuid::Uuid;
use rust_decimal::Decimal;

// ============================================================================
// Order Value Objects
// ============================================================================

/// A line about to be persisted, with the unit price captured at order time
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewOrderProduct {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}
