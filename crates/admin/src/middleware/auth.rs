//! Authentication extractors for employee routes.
//!
//! The session only carries a [`CurrentEmployee`]; protected handlers take
//! [`RequireEmployeeAuth`], which reloads that employee from
//! `login_credentials` on every request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{CurrentEmployee, session_keys};
use crate::services::{AuthError, EmployeeAuthService};
use crate::state::AppState;

/// Path anonymous visitors are sent to.
pub const LOGIN_PATH: &str = "/";

/// Extractor that requires a logged-in employee.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireEmployeeAuth(employee): RequireEmployeeAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", employee.username)
/// }
/// ```
pub struct RequireEmployeeAuth(pub CurrentEmployee);

/// Error returned when a protected route is requested without a valid login.
#[derive(Debug)]
pub enum EmployeeAuthRejection {
    /// Not logged in, or the credential behind the session is gone.
    RedirectToLogin,
    /// Session layer missing or the credential lookup failed.
    Internal,
}

impl IntoResponse for EmployeeAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireEmployeeAuth {
    type Rejection = EmployeeAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(EmployeeAuthRejection::Internal)?;

        let stored: CurrentEmployee = session
            .get(session_keys::CURRENT_EMPLOYEE)
            .await
            .ok()
            .flatten()
            .ok_or(EmployeeAuthRejection::RedirectToLogin)?;

        match EmployeeAuthService::new(state.pool()).restore(stored.id).await {
            Ok(employee) => {
                set_sentry_user(employee.id.as_i64(), &employee.username);
                Ok(Self(employee.into()))
            }
            Err(AuthError::Repository(e)) => {
                tracing::error!(error = %e, employee_id = %stored.id, "Failed to restore employee");
                Err(EmployeeAuthRejection::Internal)
            }
            Err(_) => {
                tracing::info!(employee_id = %stored.id, "Session refers to a removed employee");
                if let Err(e) = clear_current_employee(session).await {
                    tracing::warn!(error = %e, "Failed to clear stale session");
                }
                Err(EmployeeAuthRejection::RedirectToLogin)
            }
        }
    }
}

/// Extractor that optionally gets the employee stored in the session.
///
/// Unlike [`RequireEmployeeAuth`], this does not reject the request and does
/// not hit the database.
pub struct OptionalEmployeeAuth(pub Option<CurrentEmployee>);

impl<S> FromRequestParts<S> for OptionalEmployeeAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let employee = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentEmployee>(session_keys::CURRENT_EMPLOYEE)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(employee))
    }
}

/// Store the employee in the session (login).
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_employee(
    session: &Session,
    employee: &CurrentEmployee,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::CURRENT_EMPLOYEE, employee)
        .await
}

/// Clear the employee from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_employee(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    clear_sentry_user();
    session.flush().await
}
