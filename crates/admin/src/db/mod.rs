//! Database operations for the inventory SQLite file.
//!
//! # Database: a single local file (`IMS_DATABASE_PATH`)
//!
//! ## Tables
//!
//! - `product` - Products with stock level and unit price
//! - `customer` - Customers, optionally linked to an address
//! - `address` - Postal addresses
//! - `login_credentials` - Employee usernames and pins
//! - `session` - Session storage (created by `tower-sessions-sqlx-store`)
//!
//! # Bootstrap
//!
//! The schema and sample data scripts live in `crates/admin/sql/` and are
//! compiled into the binary. They are applied once, when the database file
//! does not exist yet:
//! ```bash
//! cargo run -p ims-cli -- init
//! ```

pub mod credentials;
pub mod customers;
pub mod products;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use credentials::CredentialRepository;
pub use customers::CustomerRepository;
pub use products::{InventorySummary, ProductRepository};

/// Schema creation script.
const CREATE_TABLES: &str = include_str!("../../sql/create_tables.sql");

/// Sample data scripts, applied in order.
const SAMPLE_DATA: &[(&str, &str)] = &[
    (
        "01_address.sql",
        include_str!("../../sql/populate_sample_data/01_address.sql"),
    ),
    (
        "02_customer.sql",
        include_str!("../../sql/populate_sample_data/02_customer.sql"),
    ),
    (
        "03_login_credentials.sql",
        include_str!("../../sql/populate_sample_data/03_login_credentials.sql"),
    ),
    (
        "04_product.sql",
        include_str!("../../sql/populate_sample_data/04_product.sql"),
    ),
];

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a SQLite connection pool for the database file at `path`.
///
/// The file is created if it does not exist, but no tables are created;
/// use [`ensure_database`] for that.
///
/// # Errors
///
/// Returns `sqlx::Error` if the file cannot be opened.
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Open the database, creating and populating it first if the file is absent.
///
/// An existing file is never modified.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the file cannot be opened or a
/// bootstrap script fails.
pub async fn ensure_database(path: &Path, seed: bool) -> Result<SqlitePool, RepositoryError> {
    if path.exists() {
        tracing::info!(path = %path.display(), "Database file found");
        return Ok(create_pool(path).await?);
    }

    tracing::warn!(path = %path.display(), "Database file not found, creating it");
    let pool = create_pool(path).await?;
    tracing::info!(path = %path.display(), "Database file created");

    initialize(&pool, seed).await?;
    Ok(pool)
}

/// Create the tables and, if `seed` is set, load the sample data.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any script fails.
pub async fn initialize(pool: &SqlitePool, seed: bool) -> Result<(), RepositoryError> {
    tracing::info!("Creating tables");
    sqlx::raw_sql(CREATE_TABLES).execute(pool).await?;
    tracing::info!("Created tables");

    if !seed {
        tracing::info!("Skipping sample data");
        return Ok(());
    }

    tracing::info!("Populating database");
    for (name, script) in SAMPLE_DATA {
        tracing::info!(script = name, "Populating database");
        sqlx::raw_sql(script).execute(pool).await?;
    }
    tracing::info!("Populated database");

    Ok(())
}
