//! CLI command implementations.

pub mod employee;
pub mod init;

use std::path::PathBuf;

use ims_admin::config::{ConfigError, ImsConfig};
use ims_admin::db::RepositoryError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Opening the database or creating the session table failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The database file has not been created yet.
    #[error("Database file not found: {0} (run `ims-cli init` first)")]
    DatabaseMissing(PathBuf),

    /// Username was blank.
    #[error("Username must not be empty")]
    EmptyUsername,

    /// Pin was not 1 to 9 digits.
    #[error("Pin must be 1 to 9 digits")]
    InvalidPin,

    /// Another credential already uses this username.
    #[error("Employee already exists with username: {0}")]
    EmployeeExists(String),
}

/// Resolve the database file from `--database` or the environment.
///
/// # Errors
///
/// Returns `CliError::Config` if the environment configuration is invalid.
pub fn database_path(flag: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match flag {
        Some(path) => Ok(path),
        None => Ok(ImsConfig::from_env()?.database_path),
    }
}
