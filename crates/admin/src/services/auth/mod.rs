//! Employee authentication service.
//!
//! Employees log in with a username and a numeric pin. The login framework
//! only keeps the employee ID in the session; every protected request
//! restores the employee from `login_credentials` by that ID.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;

use ims_core::EmployeeId;

use crate::db::CredentialRepository;
use crate::models::Employee;

/// Longest accepted pin. Nine digits always fits in the `INTEGER` column.
pub const MAX_PIN_DIGITS: usize = 9;

/// Employee authentication service.
pub struct EmployeeAuthService<'a> {
    credentials: CredentialRepository<'a>,
}

impl<'a> EmployeeAuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            credentials: CredentialRepository::new(pool),
        }
    }

    /// Verify a username and pin.
    ///
    /// Blank usernames and malformed pins are rejected without touching
    /// the database.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if nothing matches.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, username: &str, pin: &SecretString) -> Result<Employee, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let pin = parse_pin(pin.expose_secret()).ok_or(AuthError::InvalidCredentials)?;

        self.credentials
            .find_by_username_and_pin(username, pin)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Reload the employee behind a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmployeeNotFound` if the credential was removed.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn restore(&self, id: EmployeeId) -> Result<Employee, AuthError> {
        self.credentials
            .get_by_id(id)
            .await?
            .ok_or(AuthError::EmployeeNotFound)
    }
}

/// Parse a pin: 1 to [`MAX_PIN_DIGITS`] ASCII digits, surrounding whitespace ignored.
///
/// Pins are stored as integers, so `"0042"` and `"42"` are the same pin.
#[must_use]
pub fn parse_pin(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_PIN_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::seeded_pool;

    fn pin(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("5879"), Some(5879));
        assert_eq!(parse_pin(" 0042 "), Some(42));
        assert_eq!(parse_pin("123456789"), Some(123_456_789));
        assert_eq!(parse_pin(""), None);
        assert_eq!(parse_pin("   "), None);
        assert_eq!(parse_pin("12a4"), None);
        assert_eq!(parse_pin("-123"), None);
        assert_eq!(parse_pin("1234567890"), None);
        assert_eq!(parse_pin("5879 OR 1=1"), None);
    }

    #[tokio::test]
    async fn test_login_success() {
        let pool = seeded_pool().await;
        let employee = EmployeeAuthService::new(&pool)
            .login("agarcia", &pin("5879"))
            .await
            .unwrap();
        assert_eq!(employee.username, "agarcia");
    }

    #[tokio::test]
    async fn test_login_wrong_pin() {
        let pool = seeded_pool().await;
        let result = EmployeeAuthService::new(&pool)
            .login("agarcia", &pin("0000"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let pool = seeded_pool().await;
        let service = EmployeeAuthService::new(&pool);

        for (username, raw_pin) in [("", ""), ("", "5879"), ("agarcia", ""), ("  ", "0000")] {
            let result = service.login(username, &pin(raw_pin)).await;
            assert!(
                matches!(result, Err(AuthError::InvalidCredentials)),
                "{username:?}/{raw_pin:?} should not authenticate"
            );
        }
    }

    #[tokio::test]
    async fn test_restore() {
        let pool = seeded_pool().await;
        let service = EmployeeAuthService::new(&pool);

        let employee = service.restore(EmployeeId::new(3)).await.unwrap();
        assert_eq!(employee.username, "cjohnson");

        let missing = service.restore(EmployeeId::new(42)).await;
        assert!(matches!(missing, Err(AuthError::EmployeeNotFound)));
    }
}
