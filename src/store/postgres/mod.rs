use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

mod customers;
mod products;
mod orders;

pub use customers::PgCustomersRepository;
pub use products::PgProductsRepository;
pub use orders::PgOrdersRepository;

/// Open the connection pool shared by every repository
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to Postgres..."
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .context("failed to create postgres connection pool")
}

/// Apply pending migrations from ./migrations
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("postgres migration failed")?;

    tracing::info!("✅ Database schema is up to date");
    Ok(())
}
