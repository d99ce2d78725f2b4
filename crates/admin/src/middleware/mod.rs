//! HTTP middleware for the employee app.
//!
//! # Layer order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (tower-sessions with `SQLite` store)
//!
//! Authentication is enforced per handler through [`RequireEmployeeAuth`].

pub mod auth;
pub mod session;

pub use auth::{
    LOGIN_PATH, OptionalEmployeeAuth, RequireEmployeeAuth, clear_current_employee,
    set_current_employee,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
