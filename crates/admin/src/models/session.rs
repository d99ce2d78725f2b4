//! Session-related types for employee authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use ims_core::EmployeeId;

use super::employee::Employee;

/// Session-stored employee identity.
///
/// Minimal data stored in the session to identify the logged-in employee.
/// The record is re-checked against `login_credentials` on every protected
/// request, so deleting a credential ends its sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentEmployee {
    /// Credential row ID.
    pub id: EmployeeId,
    /// Login name.
    pub username: String,
}

impl From<Employee> for CurrentEmployee {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            username: employee.username,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in employee.
    pub const CURRENT_EMPLOYEE: &str = "current_employee";
}
