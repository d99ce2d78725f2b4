//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::{
    db::{CustomerRepository, InventorySummary, ProductRepository},
    error::Result,
    filters,
    middleware::RequireEmployeeAuth,
    state::AppState,
};

/// Dashboard metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub products: i64,
    pub units: i64,
    pub out_of_stock: i64,
    pub stock_value: Decimal,
    pub customers: i64,
}

impl DashboardMetrics {
    fn new(summary: InventorySummary, customers: i64) -> Self {
        Self {
            products: summary.product_count,
            units: summary.total_units,
            out_of_stock: summary.out_of_stock,
            stock_value: summary.stock_value,
            customers,
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub current_path: String,
    pub metrics: DashboardMetrics,
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip_all)]
pub async fn dashboard(
    RequireEmployeeAuth(employee): RequireEmployeeAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let summary = ProductRepository::new(state.pool()).summary().await?;
    let customers = CustomerRepository::new(state.pool()).count().await?;

    Ok(DashboardTemplate {
        username: employee.username,
        current_path: "/dashboard".to_string(),
        metrics: DashboardMetrics::new(summary, customers),
    })
}
