//! Employee credential commands.
//!
//! # Usage
//!
//! ```bash
//! ims-cli employee add -u jdoe -p 4821
//! ims-cli employee list
//! ```

use std::path::Path;

use ims_admin::db::{self, CredentialRepository};
use ims_admin::services::auth::parse_pin;
use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;

use super::CliError;

/// Add an employee credential.
///
/// # Errors
///
/// Returns `CliError::EmptyUsername` or `CliError::InvalidPin` for bad input,
/// `CliError::EmployeeExists` if the username is taken, and
/// `CliError::Repository` if the insert fails.
pub async fn add(database: &Path, username: &str, pin: String) -> Result<(), CliError> {
    let pin = SecretString::from(pin);
    let (username, pin) = validate(username, &pin)?;

    let pool = open(database).await?;
    let repo = CredentialRepository::new(&pool);

    if repo.username_exists(&username).await? {
        return Err(CliError::EmployeeExists(username));
    }

    let employee = repo.create(&username, pin).await?;
    tracing::info!(
        "Employee created successfully! ID: {}, Username: {}",
        employee.id,
        employee.username
    );

    pool.close().await;
    Ok(())
}

/// Print every employee credential (without pins).
///
/// # Errors
///
/// Returns `CliError::Repository` if the query fails.
#[allow(clippy::print_stdout)]
pub async fn list(database: &Path) -> Result<(), CliError> {
    let pool = open(database).await?;
    let employees = CredentialRepository::new(&pool).list_all().await?;

    if employees.is_empty() {
        println!("No employees found");
    }
    for employee in &employees {
        println!("{:>5}  {}", employee.id.as_i64(), employee.username);
    }

    pool.close().await;
    Ok(())
}

async fn open(database: &Path) -> Result<SqlitePool, CliError> {
    if !database.exists() {
        return Err(CliError::DatabaseMissing(database.to_path_buf()));
    }
    Ok(db::create_pool(database).await?)
}

fn validate(username: &str, pin: &SecretString) -> Result<(String, i64), CliError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CliError::EmptyUsername);
    }
    let pin = parse_pin(pin.expose_secret()).ok_or(CliError::InvalidPin)?;
    Ok((username.to_string(), pin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn test_validate_accepts_trimmed_username() {
        let result = validate("  jdoe ", &secret("4821"));
        assert!(matches!(result, Ok((ref u, 4821)) if u == "jdoe"));
    }

    #[test]
    fn test_validate_rejects_blank_username() {
        assert!(matches!(
            validate("   ", &secret("4821")),
            Err(CliError::EmptyUsername)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_pins() {
        for pin in ["", "12ab", "-1", "1234567890"] {
            assert!(
                matches!(validate("jdoe", &secret(pin)), Err(CliError::InvalidPin)),
                "{pin:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_open_missing_database() {
        let path = Path::new("/nonexistent/ims-cli-test/ims.db");
        assert!(matches!(
            open(path).await,
            Err(CliError::DatabaseMissing(p)) if p == path
        ));
    }
}
