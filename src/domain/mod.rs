// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each concept has its own subdirectory with:
// - Value objects
// - Entities
// - Repository trait (the store capability the use cases depend on)
// - Command handler (the use cases)
//
// Nothing in here knows about Postgres; stores are injected as trait objects.
//
// ============================================================================

pub mod errors;
pub mod customer;
pub mod product;
pub mod order;

pub use errors::AppError;
