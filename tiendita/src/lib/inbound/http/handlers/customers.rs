//! Customer CRUD handlers and their shared JSON shapes.

use serde::Deserialize;
use serde::Serialize;

use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::Address;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerCommand;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerName;
use crate::domain::user::models::EmailAddress;

pub mod create_customer;
pub mod delete_customer;
pub mod get_customer;
pub mod list_customers;
pub mod update_customer;

/// HTTP request body for create and full update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerRequest {
    #[serde(default, alias = "nombre")]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "direccion")]
    address: String,
}

impl CustomerRequest {
    fn try_into_command(self) -> Result<CustomerCommand, CustomerError> {
        let name = CustomerName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let address = Address::new(self.address)?;
        Ok(CustomerCommand::new(name, email, address))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerResponseData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
}

impl From<&Customer> for CustomerResponseData {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.0,
            name: customer.name.as_str().to_string(),
            email: customer.email.as_str().to_string(),
            address: customer.address.as_str().to_string(),
        }
    }
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, CustomerError> {
    Ok(CustomerId::from_string(raw)?)
}
