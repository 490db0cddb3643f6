use thiserror::Error;

use crate::domain::customer::models::CustomerId;
use crate::domain::user::errors::EmailError;

/// Error type for CustomerId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerIdError {
    #[error("Invalid customer ID: {0}")]
    InvalidFormat(String),
}

/// Error type for required free-text customer fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerFieldError {
    #[error("{field} is required")]
    Blank { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Top-level error type for all customer operations
#[derive(Debug, Clone, Error)]
pub enum CustomerError {
    #[error("{0}")]
    InvalidCustomerId(#[from] CustomerIdError),

    #[error("Invalid customer: {0}")]
    InvalidField(#[from] CustomerFieldError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    #[error("Customer email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
