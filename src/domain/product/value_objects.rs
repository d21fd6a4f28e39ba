use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Product Value Objects
// ============================================================================

/// A product id paired with a quantity.
///
/// As an order line request the quantity is the amount wanted; as a stock
/// update entry it is the absolute quantity the product is set to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductQuantity {
    pub id: Uuid,
    pub quantity: i32,
}

impl ProductQuantity {
    pub fn new(id: Uuid, quantity: i32) -> Self {
        Self { id, quantity }
    }

    /// Collapse repeated ids to their last entry, keeping first-seen order
    pub fn last_per_id(entries: &[ProductQuantity]) -> Vec<ProductQuantity> {
        let mut collapsed: Vec<ProductQuantity> = Vec::with_capacity(entries.len());
        for entry in entries {
            match collapsed.iter_mut().find(|seen| seen.id == entry.id) {
                Some(seen) => seen.quantity = entry.quantity,
                None => collapsed.push(*entry),
            }
        }
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_quantity_deserializes_request_shape() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{}","quantity":3}}"#, id);

        let line: ProductQuantity = serde_json::from_str(&json).unwrap();

        assert_eq!(line, ProductQuantity::new(id, 3));
    }

    #[test]
    fn test_last_per_id_keeps_last_quantity() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let collapsed = ProductQuantity::last_per_id(&[
            ProductQuantity::new(a, 4),
            ProductQuantity::new(b, 7),
            ProductQuantity::new(a, 2),
        ]);

        assert_eq!(collapsed, vec![ProductQuantity::new(a, 2), ProductQuantity::new(b, 7)]);
    }
}
