//! Integration test harness for the inventory web app.
//!
//! Each [`TestContext`] runs the real router on an ephemeral port against
//! its own seeded database file, so tests can run in parallel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ims-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;

use ims_admin::config::ImsConfig;
use ims_admin::middleware::create_session_store;
use ims_admin::state::AppState;
use ims_admin::{db, routes};
use reqwest::{Client, Response, StatusCode, header};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Sample employee seeded into every test database.
pub const EMPLOYEE_USERNAME: &str = "agarcia";
/// Pin for [`EMPLOYEE_USERNAME`].
pub const EMPLOYEE_PIN: &str = "5879";

/// A running server plus a client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
    db_path: PathBuf,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a server on a fresh database with sample data.
    pub async fn new() -> Self {
        let db_path = std::env::temp_dir().join(format!("ims-test-{}.db", Uuid::new_v4()));
        let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../admin/static");

        let db_path_str = db_path.to_string_lossy().into_owned();
        let config = ImsConfig::from_lookup(|key| match key {
            "IMS_DATABASE_PATH" => Some(db_path_str.clone()),
            "IMS_STATIC_DIR" => Some(static_dir.to_string()),
            _ => None,
        })
        .expect("test configuration should be valid");

        let pool = db::ensure_database(&config.database_path, true)
            .await
            .expect("Failed to create test database");
        let session_store = create_session_store(&pool)
            .await
            .expect("Failed to create session store");

        let app = routes::app(AppState::new(config, pool.clone()), session_store);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("listener has an address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
            pool,
            db_path,
            server,
        }
    }

    /// Start a server and log in as the sample employee.
    pub async fn logged_in() -> Self {
        let ctx = Self::new().await;
        let resp = ctx.login(EMPLOYEE_USERNAME, EMPLOYEE_PIN).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/dashboard"));
        ctx
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submit the login form.
    pub async fn login(&self, username: &str, pin: &str) -> Response {
        self.post_form("/", &[("username", username), ("pin", pin)])
            .await
    }

    /// GET `path` without following redirects.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST a urlencoded form to `path` without following redirects.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Number of rows in `product`.
    pub async fn product_count(&self) -> i64 {
        self.count("SELECT COUNT(*) FROM product").await
    }

    /// Number of rows in `customer`.
    pub async fn customer_count(&self) -> i64 {
        self.count("SELECT COUNT(*) FROM customer").await
    }

    async fn count(&self, sql: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(sql)
            .fetch_one(&self.pool)
            .await
            .expect("count query failed");
        count
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut path = self.db_path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// HTTP client with a cookie store that leaves redirects to the test.
#[must_use]
pub fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// The `Location` header of a redirect, if any.
#[must_use]
pub fn location(resp: &Response) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
