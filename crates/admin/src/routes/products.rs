//! Product list, add, edit and delete handlers.
//!
//! Submissions are checked by [`ProductForm`] before anything is written.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use ims_core::ProductId;

use crate::{
    db::ProductRepository,
    error::Result,
    filters,
    middleware::RequireEmployeeAuth,
    models::Product,
    routes::IdPath,
    state::AppState,
    validation::ProductForm,
};

// =============================================================================
// Views
// =============================================================================

/// Product row for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity_available: i64,
    /// Display price, e.g. `$12.50`.
    pub price: String,
    /// Plain amount for form inputs, e.g. `12.50`.
    pub price_input: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            quantity_available: product.quantity_available,
            price: product.price.to_string(),
            price_input: format!("{:.2}", product.price.amount()),
        }
    }
}

/// Product list with the add form.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub username: String,
    pub current_path: String,
    pub products: Vec<ProductView>,
}

/// Product list with one row turned into an edit form.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct ProductEditTemplate {
    pub username: String,
    pub current_path: String,
    pub products: Vec<ProductView>,
    pub editing_id: i64,
}

async fn product_views(state: &AppState) -> Result<Vec<ProductView>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(products.iter().map(ProductView::from).collect())
}

// =============================================================================
// Handlers
// =============================================================================

/// Product list page.
///
/// GET /products
#[instrument(skip_all)]
pub async fn index(
    RequireEmployeeAuth(employee): RequireEmployeeAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    Ok(ProductsTemplate {
        username: employee.username,
        current_path: "/products".to_string(),
        products: product_views(&state).await?,
    })
}

/// Product list with an inline edit form.
///
/// GET /products/edit/{id}
#[instrument(skip_all, fields(product_id = id))]
pub async fn edit(
    RequireEmployeeAuth(employee): RequireEmployeeAuth,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse> {
    Ok(ProductEditTemplate {
        username: employee.username,
        current_path: "/products".to_string(),
        products: product_views(&state).await?,
        editing_id: id,
    })
}

/// Add a product.
///
/// POST /products/add
#[instrument(skip_all)]
pub async fn add(
    RequireEmployeeAuth(_employee): RequireEmployeeAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    tracing::info!(?form, "Submitted product addition form");

    let product = form.validate_new().inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected product addition form");
    })?;
    tracing::info!(?product, "Validated product addition form");

    let created = ProductRepository::new(state.pool()).create(product).await?;
    tracing::info!(product_id = %created.id, "Product added");

    Ok(Redirect::to("/products"))
}

/// Apply an edit.
///
/// POST /products/edit/submit
#[instrument(skip_all)]
pub async fn submit_edit(
    RequireEmployeeAuth(_employee): RequireEmployeeAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    tracing::info!(?form, "Submitted product edit form");

    let product = form.validate_edit().inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected product edit form");
    })?;
    tracing::info!(?product, "Validated product edit form");

    ProductRepository::new(state.pool()).update(&product).await?;
    tracing::info!(product_id = %product.id, "Product updated");

    Ok(Redirect::to("/products"))
}

/// Delete a product, then go back to the list.
///
/// GET /delete-product/{id}
#[instrument(skip_all, fields(product_id = id))]
pub async fn delete(
    RequireEmployeeAuth(_employee): RequireEmployeeAuth,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Redirect> {
    let removed = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    if removed {
        tracing::info!("Product deleted");
    } else {
        tracing::debug!("No product to delete");
    }

    Ok(Redirect::to("/products"))
}
