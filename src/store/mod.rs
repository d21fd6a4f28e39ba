// ============================================================================
// Store Layer - Repository implementations
// ============================================================================
//
// - postgres/ : sqlx-backed repositories used by the service
// - memory    : in-memory fakes for unit tests
//
// ============================================================================

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::{connect, migrate, PgCustomersRepository, PgOrdersRepository, PgProductsRepository};
