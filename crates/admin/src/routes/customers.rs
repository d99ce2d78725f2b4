//! Customer list and delete handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use ims_core::CustomerId;

use crate::{
    db::CustomerRepository,
    error::Result,
    filters,
    middleware::RequireEmployeeAuth,
    models::{Address, Customer},
    routes::IdPath,
    state::AppState,
};

/// Customer view for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: i64,
    pub name: String,
    pub street: String,
    pub locality: String,
    pub phone: String,
}

impl CustomerView {
    fn new(customer: &Customer, address: &Address) -> Self {
        Self {
            id: customer.id.as_i64(),
            name: customer.full_name(),
            street: address.street(),
            locality: address.locality(),
            phone: customer.phone.formatted(),
        }
    }
}

/// Customers list template.
#[derive(Template, WebTemplate)]
#[template(path = "customers.html")]
pub struct CustomersIndexTemplate {
    pub username: String,
    pub current_path: String,
    pub customers: Vec<CustomerView>,
}

/// Customers list page handler.
///
/// Customers without an address on file are left out of the list.
///
/// GET /customers
#[instrument(skip_all)]
pub async fn index(
    RequireEmployeeAuth(employee): RequireEmployeeAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = CustomerRepository::new(state.pool());
    let mut customers = Vec::new();

    for customer in repo.list_all().await? {
        let Some(address_id) = customer.address_id else {
            tracing::debug!(customer_id = %customer.id, "Customer has no address");
            continue;
        };
        match repo.get_address(address_id).await? {
            Some(address) => customers.push(CustomerView::new(&customer, &address)),
            None => {
                tracing::debug!(
                    customer_id = %customer.id,
                    address_id = %address_id,
                    "Customer address not found"
                );
            }
        }
    }

    Ok(CustomersIndexTemplate {
        username: employee.username,
        current_path: "/customers".to_string(),
        customers,
    })
}

/// Delete a customer, then go back to the list.
///
/// GET /delete-customer/{id}
#[instrument(skip_all, fields(customer_id = id))]
pub async fn delete(
    RequireEmployeeAuth(_employee): RequireEmployeeAuth,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Redirect> {
    if CustomerRepository::new(state.pool())
        .delete(CustomerId::new(id))
        .await?
    {
        tracing::info!("Customer deleted");
    }

    Ok(Redirect::to("/customers"))
}
