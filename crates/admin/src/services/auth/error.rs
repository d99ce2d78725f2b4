//! Employee authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during employee authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username and pin do not match any credential (or were blank).
    #[error("invalid username or pin")]
    InvalidCredentials,

    /// The employee referenced by the session no longer exists.
    #[error("employee not found")]
    EmployeeNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
