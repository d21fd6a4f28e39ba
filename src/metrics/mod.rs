// Private module declaration
mod server;

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for order placement
// ============================================================================
//
// All metrics are registered with a private Registry and can be scraped via
// /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub order_creation_failed: IntCounterVec,
    pub order_creation_duration: Histogram,
    pub order_line_items: IntCounter,
    pub stock_units_reserved: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new("orders_created_total", "Total orders created")?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_creation_failed = IntCounterVec::new(
            Opts::new("order_creation_failed_total", "Total order creation attempts that failed"),
            &["reason"],
        )?;
        registry.register(Box::new(order_creation_failed.clone()))?;

        let order_creation_duration = Histogram::with_opts(
            HistogramOpts::new("order_creation_duration_seconds", "Order creation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;
        registry.register(Box::new(order_creation_duration.clone()))?;

        let order_line_items = IntCounter::new(
            "order_line_items_total",
            "Total line items across created orders",
        )?;
        registry.register(Box::new(order_line_items.clone()))?;

        let stock_units_reserved = IntCounter::new(
            "stock_units_reserved_total",
            "Total product units taken out of stock by orders",
        )?;
        registry.register(Box::new(stock_units_reserved.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_creation_failed,
            order_creation_duration,
            order_line_items,
            stock_units_reserved,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a successfully placed order
    pub fn record_order_created(&self, line_items: usize, units: u64, duration_secs: f64) {
        self.orders_created.inc();
        self.order_line_items.inc_by(line_items as u64);
        self.stock_units_reserved.inc_by(units);
        self.order_creation_duration.observe(duration_secs);
    }

    /// Helper to record a failed attempt; `reason` is `validation` or `store`
    pub fn record_order_failed(&self, reason: &str, duration_secs: f64) {
        self.order_creation_failed.with_label_values(&[reason]).inc();
        self.order_creation_duration.observe(duration_secs);
    }
}
