use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomersRepository, Email, NewCustomer};
use crate::domain::order::{NewOrder, Order, OrderProduct, OrdersRepository};
use crate::domain::product::{NewProduct, Product, ProductQuantity, ProductsRepository};

// ============================================================================
// In-memory repositories for unit tests
// ============================================================================
//
// Each fake counts the calls the order workflow cares about so tests can
// assert which stores were touched.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomers {
    rows: Mutex<Vec<Customer>>,
    find_calls: AtomicUsize,
}

impl InMemoryCustomers {
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CustomersRepository for InMemoryCustomers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| &c.email == email).cloned())
    }

    async fn create(&self, data: NewCustomer) -> Result<Customer> {
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(customer.clone());
        Ok(customer)
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    rows: Mutex<Vec<Product>>,
    find_calls: AtomicUsize,
    last_update: Mutex<Option<Vec<ProductQuantity>>>,
    fail_updates: AtomicBool,
}

impl InMemoryProducts {
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    /// The batch passed to the most recent successful `update_quantity`
    pub fn last_update(&self) -> Option<Vec<ProductQuantity>> {
        self.last_update.lock().unwrap().clone()
    }

    pub fn stock_of(&self, id: Uuid) -> Option<i32> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|p| p.id == id).map(|p| p.quantity)
    }

    pub fn set_price(&self, id: Uuid, price: Decimal) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(product) = rows.iter_mut().find(|p| p.id == id) {
            product.price = price;
        }
    }

    /// Make every following `update_quantity` fail
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProducts {
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.name == name).cloned())
    }

    async fn find_all_by_id(&self, products: &[ProductQuantity]) -> Result<Vec<Product>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| products.iter().any(|requested| requested.id == p.id))
            .cloned()
            .collect())
    }

    async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            bail!("products store unavailable");
        }

        let mut rows = self.rows.lock().unwrap();
        for update in products {
            if let Some(product) = rows.iter_mut().find(|p| p.id == update.id) {
                product.quantity = update.quantity;
                product.updated_at = Utc::now();
            }
        }
        *self.last_update.lock().unwrap() = Some(products.to_vec());
        Ok(())
    }

    async fn create(&self, data: NewProduct) -> Result<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: data.name,
            price: data.price,
            quantity: data.quantity,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    rows: Mutex<HashMap<Uuid, Order>>,
    create_calls: AtomicUsize,
}

impl InMemoryOrders {
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrders {
    async fn create(&self, data: NewOrder) -> Result<Order> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let order = Order {
            id: order_id,
            customer_id: Some(data.customer.id),
            order_products: data
                .products
                .into_iter()
                .map(|line| OrderProduct {
                    id: Uuid::new_v4(),
                    order_id,
                    product_id: line.product_id,
                    price: line.price,
                    quantity: line.quantity,
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };

        self.rows.lock().unwrap().insert(order_id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}
