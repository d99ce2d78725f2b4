//! Business logic services for the inventory application.
//!
//! # Services
//!
//! - `auth` - Employee username + pin authentication

pub mod auth;

pub use auth::{AuthError, EmployeeAuthService};
