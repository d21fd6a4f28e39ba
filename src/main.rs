use std::sync::Arc;
use rust_decimal_macros::dec;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod metrics;
mod store;

use config::AppConfig;
use domain::customer::CustomerCommandHandler;
use domain::order::{CreateOrder, OrderCommandHandler};
use domain::product::{ProductCommandHandler, ProductQuantity};
use store::{PgCustomersRepository, PgOrdersRepository, PgProductsRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ecommerce_orders=debug"))
        )
        .init();

    tracing::info!("🚀 Starting e-commerce order service");

    let config = AppConfig::from_env()?;

    // === 1. Database pool and schema ===
    let pool = store::connect(&config.database).await?;
    store::migrate(&pool).await?;

    // === 2. Metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    let metrics_server = metrics::metrics_server(Arc::new(metrics.registry().clone()), config.metrics_port)?;

    // === 3. Repositories and handlers ===
    let customers = Arc::new(PgCustomersRepository::new(pool.clone()));
    let products = Arc::new(PgProductsRepository::new(pool.clone()));
    let orders = Arc::new(PgOrdersRepository::new(pool.clone()));

    let customer_handler = CustomerCommandHandler::new(customers.clone());
    let product_handler = ProductCommandHandler::new(products.clone());
    let order_handler = OrderCommandHandler::new(orders, products, customers, metrics.clone());

    // === 4. Optional demo order ===
    if config.run_demo {
        if let Err(e) = run_demo(&customer_handler, &product_handler, &order_handler).await {
            tracing::error!(error = %e, "Demo order failed");
        }
    }

    // Runs until SIGINT/SIGTERM
    tracing::info!("⏳ Serving metrics until shutdown");
    metrics_server.await?;

    pool.close().await;
    tracing::info!("👋 Shut down");

    Ok(())
}

/// Register a customer and two products, place an order and read it back
async fn run_demo(
    customers: &CustomerCommandHandler,
    products: &ProductCommandHandler,
    orders: &OrderCommandHandler,
) -> anyhow::Result<()> {
    tracing::info!("📝 Placing demo order");

    // Unique per run so the demo can be repeated against the same database
    let run = uuid::Uuid::new_v4().simple().to_string();

    let customer = customers
        .register_customer("Demo Customer", &format!("demo-{}@example.com", run))
        .await?;
    let keyboard = products
        .create_product(&format!("Keyboard {}", run), dec!(10.00), 5)
        .await?;
    let mouse = products
        .create_product(&format!("Mouse {}", run), dec!(20.00), 3)
        .await?;

    let order = orders
        .create_order(CreateOrder {
            customer_id: customer.id,
            products: vec![
                ProductQuantity::new(keyboard.id, 2),
                ProductQuantity::new(mouse.id, 1),
            ],
        })
        .await?;

    let stored = orders.find_order(order.id).await?;
    tracing::info!(
        order_id = %stored.id,
        lines = stored.order_products.len(),
        total = %stored.total(),
        "🎉 Demo order placed"
    );

    Ok(())
}
