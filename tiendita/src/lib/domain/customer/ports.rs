use async_trait::async_trait;

use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerCommand;
use crate::domain::customer::models::CustomerId;

/// Port for customer domain service operations.
#[async_trait]
pub trait CustomerServicePort: Send + Sync + 'static {
    /// List every customer, ordered by id.
    async fn list_customers(&self) -> Result<Vec<Customer>, CustomerError>;

    /// # Errors
    /// * `NotFound` - Customer does not exist
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, CustomerError>;

    /// # Errors
    /// * `EmailAlreadyExists` - Another customer has this email
    async fn create_customer(&self, command: CustomerCommand) -> Result<Customer, CustomerError>;

    /// Replace name, email and address of an existing customer.
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist
    /// * `EmailAlreadyExists` - Another customer has this email
    async fn update_customer(
        &self,
        id: &CustomerId,
        command: CustomerCommand,
    ) -> Result<Customer, CustomerError>;

    /// # Errors
    /// * `NotFound` - Customer does not exist
    async fn delete_customer(&self, id: &CustomerId) -> Result<(), CustomerError>;
}

/// Persistence operations for customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    /// Retrieve all customers ordered by id.
    async fn list_all(&self) -> Result<Vec<Customer>, CustomerError>;

    /// Retrieve customer by identifier.
    ///
    /// # Returns
    /// Optional customer (None if not found)
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError>;

    /// Persist a new customer; the store assigns the id.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already used by a customer
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, command: CustomerCommand) -> Result<Customer, CustomerError>;

    /// Overwrite an existing customer.
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist
    /// * `EmailAlreadyExists` - Email is already used by another customer
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, customer: Customer) -> Result<Customer, CustomerError>;

    /// Remove customer from storage.
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &CustomerId) -> Result<(), CustomerError>;
}
