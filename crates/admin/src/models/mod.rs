//! Domain models for the inventory application.
//!
//! These are the entity wrappers: each one reshapes a database row into
//! named fields. They carry no behavior beyond simple derived values.

pub mod customer;
pub mod employee;
pub mod product;
pub mod session;

pub use customer::{Address, Customer};
pub use employee::Employee;
pub use product::{NewProduct, Product};
pub use session::{CurrentEmployee, keys as session_keys};
