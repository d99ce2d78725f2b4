//! Core types for the inventory system.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod price;

pub use id::*;
pub use phone::PhoneNumber;
pub use price::{Price, PriceError};
