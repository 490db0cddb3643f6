pub mod customer;
pub mod memory;
pub mod user;

pub use customer::PostgresCustomerRepository;
pub use memory::InMemoryCustomerRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
