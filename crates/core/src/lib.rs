//! Inventory Management Core - Shared types library.
//!
//! This crate provides the domain types used across the inventory components:
//! - `admin` - Employee-facing web application (login, products, customers)
//! - `cli` - Command-line tools for database setup and credential management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and phone numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
