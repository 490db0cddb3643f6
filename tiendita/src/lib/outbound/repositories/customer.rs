use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::Address;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerCommand;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerName;
use crate::domain::customer::ports::CustomerRepository;
use crate::domain::user::models::EmailAddress;

pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `customers` table.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    address: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = CustomerError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: CustomerId(row.id),
            name: CustomerName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            address: Address::new(row.address)?,
        })
    }
}

fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> CustomerError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("customers_email_key") {
            return CustomerError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    CustomerError::DatabaseError(e.to_string())
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn list_all(&self) -> Result<Vec<Customer>, CustomerError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, address
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CustomerError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, address
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CustomerError::DatabaseError(e.to_string()))?;

        row.map(Customer::try_from).transpose()
    }

    async fn create(&self, command: CustomerCommand) -> Result<Customer, CustomerError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customers (name, email, address)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(command.name.as_str())
        .bind(command.email.as_str())
        .bind(command.address.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &command.email))?;

        Ok(command.into_customer(CustomerId(id)))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, email = $3, address = $4
            WHERE id = $1
            "#,
        )
        .bind(customer.id.0)
        .bind(customer.name.as_str())
        .bind(customer.email.as_str())
        .bind(customer.address.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &customer.email))?;

        if result.rows_affected() == 0 {
            return Err(CustomerError::NotFound(customer.id));
        }

        Ok(customer)
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), CustomerError> {
        let result = sqlx::query(
            r#"
            DELETE FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| CustomerError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CustomerError::NotFound(*id));
        }

        Ok(())
    }
}
