// ============================================================================
// Order Domain - Order Placement
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (NewOrderProduct)
// - Entities (Order, OrderProduct, NewOrder)
// - Commands (CreateOrder)
// - Repository (OrdersRepository)
// - Command Handler (OrderCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod entities;
pub mod commands;
pub mod repository;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use entities::*;
pub use commands::*;
pub use repository::*;
pub use command_handler::*;
