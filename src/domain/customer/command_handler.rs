use std::sync::Arc;
use anyhow::Result;

use crate::domain::errors::app_bail;

use super::entities::{Customer, NewCustomer};
use super::repository::CustomersRepository;
use super::value_objects::Email;

// ============================================================================
// Customer Command Handler
// ============================================================================

pub struct CustomerCommandHandler {
    customers: Arc<dyn CustomersRepository>,
}

impl CustomerCommandHandler {
    pub fn new(customers: Arc<dyn CustomersRepository>) -> Self {
        Self { customers }
    }

    /// Register a customer; the email must not belong to anyone else
    pub async fn register_customer(&self, name: &str, email: &str) -> Result<Customer> {
        let name = name.trim();
        if name.is_empty() {
            app_bail!("Customer name cannot be empty");
        }

        let email = Email::new(email);
        if !email.is_valid() {
            app_bail!("Invalid email: {}", email);
        }

        if self.customers.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Rejected customer with duplicate email");
            app_bail!("This email is already assigned to a customer");
        }

        let customer = self
            .customers
            .create(NewCustomer {
                name: name.to_string(),
                email,
            })
            .await?;

        tracing::info!(
            customer_id = %customer.id,
            email = %customer.email,
            "✅ Customer registered"
        );

        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppError;
    use crate::store::memory::InMemoryCustomers;

    fn handler() -> (Arc<InMemoryCustomers>, CustomerCommandHandler) {
        let customers = Arc::new(InMemoryCustomers::default());
        let handler = CustomerCommandHandler::new(customers.clone());
        (customers, handler)
    }

    fn message(error: anyhow::Error) -> String {
        error.downcast_ref::<AppError>().expect("domain error").message.clone()
    }

    #[tokio::test]
    async fn test_register_customer() {
        let (customers, handler) = handler();

        let customer = handler.register_customer("Jane Doe", "jane@example.com").await.unwrap();

        assert_eq!(customer.name, "Jane Doe");
        assert_eq!(customer.email.as_str(), "jane@example.com");
        let stored = customers.find_by_id(customer.id).await.unwrap();
        assert_eq!(stored, Some(customer));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (_, handler) = handler();
        handler.register_customer("Jane Doe", "jane@example.com").await.unwrap();

        let error = handler.register_customer("Other Jane", "jane@example.com").await.unwrap_err();

        assert_eq!(message(error), "This email is already assigned to a customer");
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let (_, handler) = handler();

        let error = handler.register_customer("   ", "jane@example.com").await.unwrap_err();
        assert_eq!(message(error), "Customer name cannot be empty");

        let error = handler.register_customer("Jane", "not-an-email").await.unwrap_err();
        assert_eq!(message(error), "Invalid email: not-an-email");
    }
}
