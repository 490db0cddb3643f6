use std::fmt;

use crate::domain::customer::errors::CustomerFieldError;
use crate::domain::customer::errors::CustomerIdError;
use crate::domain::user::models::EmailAddress;

/// Store customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub email: EmailAddress,
    pub address: Address,
}

/// Store-assigned customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub i64);

impl CustomerId {
    /// Parse a customer ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, CustomerIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(CustomerIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn required_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, CustomerFieldError> {
    let value = value.trim();
    let length = value.chars().count();

    if length == 0 {
        Err(CustomerFieldError::Blank { field })
    } else if length > max {
        Err(CustomerFieldError::TooLong {
            field,
            max,
            actual: length,
        })
    } else {
        Ok(value.to_string())
    }
}

/// Customer name, trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerName(String);

impl CustomerName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, CustomerFieldError> {
        required_text("Name", name, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Postal address, trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    const MAX_LENGTH: usize = 255;

    pub fn new(address: String) -> Result<Self, CustomerFieldError> {
        required_text("Address", address, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated customer fields, used for both create and full update.
#[derive(Debug, Clone)]
pub struct CustomerCommand {
    pub name: CustomerName,
    pub email: EmailAddress,
    pub address: Address,
}

impl CustomerCommand {
    pub fn new(name: CustomerName, email: EmailAddress, address: Address) -> Self {
        Self {
            name,
            email,
            address,
        }
    }

    /// Apply the command to an existing id.
    pub fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
        }
    }
}
