//! Session middleware configuration.
//!
//! Sets up SQLite-backed sessions using tower-sessions, stored in the same
//! database file as the inventory tables.

use sqlx::SqlitePool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::ImsConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ims_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Table holding session records.
const SESSION_TABLE: &str = "session";

/// Create the session store and make sure its table exists.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn create_session_store(pool: &SqlitePool) -> Result<SqliteStore, sqlx::Error> {
    let store = SqliteStore::new(pool.clone())
        .with_table_name(SESSION_TABLE)
        .map_err(|e| sqlx::Error::Configuration(e.into()))?;
    store.migrate().await?;
    Ok(store)
}

/// Create the session layer.
///
/// # Arguments
///
/// * `store` - SQLite session store from [`create_session_store`]
/// * `config` - Application configuration (for determining HTTPS mode)
#[must_use]
pub fn create_session_layer(
    store: SqliteStore,
    config: &ImsConfig,
) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
