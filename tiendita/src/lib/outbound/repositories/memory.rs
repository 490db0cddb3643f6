//! Process-local stores, used when no database is configured and in tests.
//!
//! Uniqueness checks and inserts happen under one write lock, which gives
//! the same first-writer-wins behaviour as the Postgres unique constraints.

use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerCommand;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::ports::CustomerRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    /// Map of normalised email -> User
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.email.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(email.as_str()).cloned())
    }
}

#[derive(Debug)]
struct CustomerTable {
    next_id: i64,
    customers: BTreeMap<CustomerId, Customer>,
}

impl CustomerTable {
    fn email_taken_by_other(&self, email: &EmailAddress, id: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|c| &c.email == email && Some(c.id) != id)
    }
}

#[derive(Debug)]
pub struct InMemoryCustomerRepository {
    table: RwLock<CustomerTable>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(CustomerTable {
                next_id: 1,
                customers: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.table.read().await.customers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError> {
        Ok(self.table.read().await.customers.get(id).cloned())
    }

    async fn create(&self, command: CustomerCommand) -> Result<Customer, CustomerError> {
        let mut table = self.table.write().await;

        if table.email_taken_by_other(&command.email, None) {
            return Err(CustomerError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let id = CustomerId(table.next_id);
        table.next_id += 1;

        let customer = command.into_customer(id);
        table.customers.insert(id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let mut table = self.table.write().await;

        if !table.customers.contains_key(&customer.id) {
            return Err(CustomerError::NotFound(customer.id));
        }
        if table.email_taken_by_other(&customer.email, Some(customer.id)) {
            return Err(CustomerError::EmailAlreadyExists(
                customer.email.as_str().to_string(),
            ));
        }

        table.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), CustomerError> {
        self.table
            .write()
            .await
            .customers
            .remove(id)
            .map(|_| ())
            .ok_or(CustomerError::NotFound(*id))
    }
}
