//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (database)
//!
//! # Auth
//! GET  /                         - Login page
//! POST /                         - Verify username + pin
//! GET  /logout                   - Logout
//!
//! # Dashboard
//! GET  /dashboard                - Inventory summary
//!
//! # Products
//! GET  /products                 - Product list with add form
//! GET  /products/edit/{id}       - Product list with one row editable
//! POST /products/add             - Add a product
//! POST /products/edit/submit     - Save an edited product
//! GET  /delete-product/{id}      - Delete a product
//!
//! # Customers
//! GET  /customers                - Customer list
//! GET  /delete-customer/{id}     - Delete a customer
//! ```
//!
//! Everything except the login page, logout, health checks and static
//! files requires a logged-in employee. A non-numeric `{id}` is a 404.

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod products;

use axum::{
    Router,
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Integer `{id}` path segment.
///
/// Anything that does not parse as an `i64` is answered with 404, the same
/// as a URL that matches no route.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|_| StatusCode::NOT_FOUND)
    }
}

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Auth
        .route("/", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Dashboard
        .route("/dashboard", get(dashboard::dashboard))
        // Products
        .route("/products", get(products::index))
        .route("/products/edit/{id}", get(products::edit))
        .route("/products/add", post(products::add))
        .route("/products/edit/submit", post(products::submit_edit))
        .route("/delete-product/{id}", get(products::delete))
        // Customers
        .route("/customers", get(customers::index))
        .route("/delete-customer/{id}", get(customers::delete))
}

/// Build the full application: routes, static files, sessions and request tracing.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState, session_store: SqliteStore) -> Router {
    let session_layer = create_session_layer(session_store, state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
