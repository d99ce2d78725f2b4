//! Employee credential repository.
//!
//! Backs both halves of authentication: the login form (username + pin)
//! and session restore (id).

use sqlx::SqlitePool;

use ims_core::EmployeeId;

use super::RepositoryError;
use crate::models::Employee;

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    username: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(row.id),
            username: row.username,
        }
    }
}

/// Repository for `login_credentials`.
pub struct CredentialRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CredentialRepository<'a> {
    /// Create a new credential repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an employee by credential ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, username FROM login_credentials WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Find the employee whose username and pin both match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_username_and_pin(
        &self,
        username: &str,
        pin: i64,
    ) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r"
            SELECT id, username
            FROM login_credentials
            WHERE username = ? AND pin = ?
            LIMIT 1
            ",
        )
        .bind(username)
        .bind(pin)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Whether any credential uses this username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM login_credentials WHERE username = ?)")
                .bind(username)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Add a credential.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, username: &str, pin: i64) -> Result<Employee, RepositoryError> {
        let result = sqlx::query("INSERT INTO login_credentials (username, pin) VALUES (?, ?)")
            .bind(username)
            .bind(pin)
            .execute(self.pool)
            .await?;

        Ok(Employee {
            id: EmployeeId::new(result.last_insert_rowid()),
            username: username.to_string(),
        })
    }

    /// List all employees by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, username FROM login_credentials ORDER BY username, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
