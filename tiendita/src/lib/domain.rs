pub mod customer;
pub mod user;
