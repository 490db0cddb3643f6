use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerCommand;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::ports::CustomerRepository;
use crate::domain::customer::ports::CustomerServicePort;

/// Domain service implementation for customer operations.
pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    repository: Arc<CR>,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> CustomerServicePort for CustomerService<CR>
where
    CR: CustomerRepository,
{
    async fn list_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        self.repository.list_all().await
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, CustomerError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(*id))
    }

    async fn create_customer(&self, command: CustomerCommand) -> Result<Customer, CustomerError> {
        let customer = self.repository.create(command).await?;

        tracing::info!(customer_id = %customer.id, "Customer created");

        Ok(customer)
    }

    async fn update_customer(
        &self,
        id: &CustomerId,
        command: CustomerCommand,
    ) -> Result<Customer, CustomerError> {
        let customer = self.repository.update(command.into_customer(*id)).await?;

        tracing::info!(customer_id = %customer.id, "Customer updated");

        Ok(customer)
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), CustomerError> {
        self.repository.delete(id).await?;

        tracing::info!(customer_id = %id, "Customer deleted");

        Ok(())
    }
}
