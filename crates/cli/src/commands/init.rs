//! Database initialization.
//!
//! # Usage
//!
//! ```bash
//! ims-cli init            # schema + sample data
//! ims-cli init --no-seed  # schema only
//! ```
//!
//! An existing database file is left as it is; only the session table is
//! added if missing.

use std::path::Path;

use ims_admin::{db, middleware::create_session_store};

use super::CliError;

/// Create the database file and session table if they do not exist.
///
/// # Errors
///
/// Returns `CliError::Repository` if a bootstrap script fails and
/// `CliError::Database` if the session table cannot be created.
pub async fn run(database: &Path, seed: bool) -> Result<(), CliError> {
    tracing::info!(path = %database.display(), seed, "Initializing database");

    let pool = db::ensure_database(database, seed).await?;
    create_session_store(&pool).await?;
    pool.close().await;

    tracing::info!("Database ready");
    Ok(())
}
