use std::sync::Arc;
use std::time::Instant;
use anyhow::Result;
use uuid::Uuid;

use crate::domain::customer::CustomersRepository;
use crate::domain::errors::app_bail;
use crate::domain::AppError;
use crate::domain::product::{Product, ProductQuantity, ProductsRepository};
use crate::metrics::Metrics;

use super::{CreateOrder, NewOrder, NewOrderProduct, Order, OrdersRepository};

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Customer → Products → Stock check → Order store → Stock update
//
// Every step is a sequential await and any failure aborts immediately. The
// order insert and the stock update hit different stores and are not wrapped
// in a shared transaction: if the update fails the order stays persisted and
// stock is left as it was.
//
// ============================================================================

pub struct OrderCommandHandler {
    orders: Arc<dyn OrdersRepository>,
    products: Arc<dyn ProductsRepository>,
    customers: Arc<dyn CustomersRepository>,
    metrics: Arc<Metrics>,
}

impl OrderCommandHandler {
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        products: Arc<dyn ProductsRepository>,
        customers: Arc<dyn CustomersRepository>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            orders,
            products,
            customers,
            metrics,
        }
    }

    /// Validate and place an order, then take the ordered units out of stock.
    ///
    /// Not idempotent: the same command twice yields two orders and two
    /// decrements.
    pub async fn create_order(&self, command: CreateOrder) -> Result<Order> {
        let started = Instant::now();
        let customer_id = command.customer_id;

        let result = self.place_order(command).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok((order, units_reserved)) => {
                self.metrics
                    .record_order_created(order.order_products.len(), *units_reserved, elapsed);
            }
            Err(e) => {
                let reason = if e.downcast_ref::<AppError>().is_some() {
                    tracing::warn!(customer_id = %customer_id, error = %e, "Order rejected");
                    "validation"
                } else {
                    tracing::error!(customer_id = %customer_id, error = %e, "Order creation failed");
                    "store"
                };
                self.metrics.record_order_failed(reason, elapsed);
            }
        }

        result.map(|(order, _)| order)
    }

    /// Returns the order and the number of units taken out of stock
    async fn place_order(&self, command: CreateOrder) -> Result<(Order, u64)> {
        let CreateOrder {
            customer_id,
            products,
        } = command;

        let customer = match self.customers.find_by_id(customer_id).await? {
            Some(customer) => customer,
            None => app_bail!("Could not find any customer with the given id"),
        };

        if let Some(line) = products.iter().find(|p| p.quantity <= 0) {
            app_bail!("Invalid item quantity: {}", line.quantity);
        }

        let found_products = self.products.find_all_by_id(&products).await?;

        tracing::debug!(
            customer_id = %customer_id,
            requested = products.len(),
            found = found_products.len(),
            "Looked up requested products"
        );

        if found_products.is_empty() {
            app_bail!("Could not find any products with the given id");
        }

        let missing: Vec<Uuid> = products
            .iter()
            .filter(|requested| !found_products.iter().any(|p| p.id == requested.id))
            .map(|requested| requested.id)
            .collect();

        match missing.as_slice() {
            [] => {}
            [id] => app_bail!("Could not find product {}", id),
            ids => app_bail!("Could not find products {}", join_ids(ids)),
        }

        let mut unavailable = Vec::new();
        for requested in &products {
            let product = find_product(&found_products, requested.id)?;
            if product.quantity < requested.quantity {
                unavailable.push(requested);
            }
        }

        // Only the first offending line is reported
        if let Some(first) = unavailable.first() {
            app_bail!("The quantity {} is not available for {}", first.quantity, first.id);
        }

        let lines = products
            .iter()
            .map(|requested| -> Result<NewOrderProduct> {
                let product = find_product(&found_products, requested.id)?;
                Ok(NewOrderProduct {
                    product_id: requested.id,
                    quantity: requested.quantity,
                    price: product.price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let order = self
            .orders
            .create(NewOrder {
                customer,
                products: lines,
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %customer_id,
            line_count = order.order_products.len(),
            total = %order.total(),
            "✅ Order created"
        );

        // New stock is computed from the quantities read before the order was
        // placed, not re-read from the store
        let stock_updates = order
            .order_products
            .iter()
            .map(|ordered| -> Result<ProductQuantity> {
                let product = find_product(&found_products, ordered.product_id)?;
                Ok(ProductQuantity::new(product.id, product.quantity - ordered.quantity))
            })
            .collect::<Result<Vec<_>>>()?;

        // A product listed on several lines ends at its last update, so only
        // that one counts towards the units reserved
        let units_reserved: i64 = ProductQuantity::last_per_id(&stock_updates)
            .iter()
            .map(|update| -> Result<i64> {
                let product = find_product(&found_products, update.id)?;
                Ok(i64::from(product.quantity - update.quantity))
            })
            .sum::<Result<i64>>()?;

        self.products.update_quantity(&stock_updates).await?;

        tracing::debug!(
            order_id = %order.id,
            updated_products = stock_updates.len(),
            "Stock decremented for order"
        );

        Ok((order, units_reserved.max(0) as u64))
    }

    /// Fetch a previously placed order with its lines
    pub async fn find_order(&self, order_id: Uuid) -> Result<Order> {
        match self.orders.find_by_id(order_id).await? {
            Some(order) => Ok(order),
            None => app_bail!("Could not find any order with the given id"),
        }
    }
}

fn find_product(found: &[Product], id: Uuid) -> Result<&Product> {
    match found.iter().find(|p| p.id == id) {
        Some(product) => Ok(product),
        None => app_bail!("Could not find product"),
    }
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(",")
}

// ============================================================================
// Unit Tests
// ============================================================================
