//! Employee credential domain type.

use ims_core::EmployeeId;

/// An employee allowed to log in, as stored in `login_credentials`.
///
/// The pin is not carried here. Lookups match on it in SQL and only the
/// identity leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Credential row ID.
    pub id: EmployeeId,
    /// Login name.
    pub username: String,
}
