//! Inventory Management System employee web application.
//!
//! This crate provides the web app as a library so it can be driven by the
//! `ims-admin` binary, the `ims-cli` operator tool and the integration tests.
//!
//! # Layout
//!
//! - [`config`] - Environment configuration
//! - [`db`] - `SQLite` pool, bootstrap scripts and repositories
//! - [`models`] - Entity wrappers for database rows
//! - [`services`] - Employee authentication
//! - [`middleware`] - Sessions and auth extractors
//! - [`routes`] - HTTP handlers and the application router
//! - [`validation`] - Product form checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
