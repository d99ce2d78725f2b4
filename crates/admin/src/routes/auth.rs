//! Login and logout handlers.
//!
//! The login form lives at `/`; a successful login lands on `/dashboard`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    error::{Result, set_sentry_user},
    filters,
    middleware::{OptionalEmployeeAuth, clear_current_employee, set_current_employee},
    models::CurrentEmployee,
    services::{AuthError, EmployeeAuthService},
    state::AppState,
};

/// Where a logged-in employee is sent.
const HOME_PATH: &str = "/dashboard";

/// Shown when a username/pin pair does not match.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or pin";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub username: String,
}

/// Login form submission.
///
/// Missing fields deserialize as empty strings, which never authenticate.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub pin: String,
}

/// Render the login page, or skip it for an employee who is already logged in.
///
/// GET /
#[instrument(skip_all)]
pub async fn login_page(OptionalEmployeeAuth(employee): OptionalEmployeeAuth) -> Response {
    if employee.is_some() {
        return Redirect::to(HOME_PATH).into_response();
    }
    LoginTemplate {
        error: None,
        username: String::new(),
    }
    .into_response()
}

/// Verify a username and pin.
///
/// POST /
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let pin = SecretString::from(form.pin);
    match EmployeeAuthService::new(state.pool())
        .login(&form.username, &pin)
        .await
    {
        Ok(employee) => {
            set_current_employee(&session, &CurrentEmployee::from(employee.clone())).await?;
            set_sentry_user(employee.id.as_i64(), &employee.username);
            tracing::info!(employee_id = %employee.id, "Employee logged in");
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(AuthError::InvalidCredentials | AuthError::EmployeeNotFound) => {
            tracing::warn!("Login rejected");
            Ok(LoginTemplate {
                error: Some(INVALID_CREDENTIALS_MESSAGE.to_string()),
                username: form.username.trim().to_string(),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Logout and clear the session.
///
/// GET /logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_employee(&session).await {
        tracing::warn!(error = %e, "Failed to clear session on logout");
    }
    Redirect::to("/")
}
