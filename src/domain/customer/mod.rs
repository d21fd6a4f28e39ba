// ============================================================================
// Customer Domain
// ============================================================================
//
// - Value objects (Email)
// - Entities (Customer, NewCustomer)
// - Repository (CustomersRepository)
// - Command Handler (CustomerCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod entities;
pub mod repository;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use entities::*;
pub use repository::*;
pub use command_handler::*;
