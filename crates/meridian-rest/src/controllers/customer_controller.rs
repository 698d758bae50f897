//! Customer management controller.

use crate::{
    extractors::{PaginationQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use meridian_core::{CustomerId, MeridianError, MeridianResult, Page, PageRequest, UseCase};
use meridian_domain::{Customer, CustomerStatus};
use meridian_repository::CustomerFilter;
use meridian_service::{
    CreateCustomerRequest, CustomerPageResponse, CustomerResponse, CustomerStatusCommand,
    DeleteCustomerCommand, UpdateCustomerCommand, UpdateCustomerRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Filters accepted by the customer list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// Only customers in this status.
    pub status: Option<CustomerStatus>,
    /// Only customers in this industry (exact, case-insensitive).
    pub industry: Option<String>,
    /// Company name fragment (case-insensitive).
    pub search: Option<String>,
}

impl CustomerListQuery {
    fn industry(&self) -> Option<&str> {
        self.industry.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Creates the customer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/email/:email", get(get_customer_by_email))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:id/activate", post(activate_customer))
        .route("/:id/deactivate", post(deactivate_customer))
}

/// List customers, optionally filtered by status, industry or a company
/// name fragment.
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(
        ("page" = Option<usize>, Query, description = "Zero-based page index"),
        ("size" = Option<usize>, Query, description = "Page size, at most 100"),
        ("sort" = Option<Vec<String>>, Query, description = "Sort key as property[,asc|desc]; may repeat"),
        CustomerListQuery
    ),
    responses(
        (status = 200, description = "A page of customers", body = CustomerPageResponse),
        (status = 400, description = "Invalid paging, sort or filter parameters")
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
    Query(query): Query<CustomerListQuery>,
) -> ApiResult<CustomerPageResponse> {
    debug!(?query, "List customers request");

    let page_request = pagination.into_page_request()?;
    let page = dispatch_list(&state, &query, &page_request).await?;
    ok(CustomerPageResponse::from(page))
}

async fn dispatch_list(
    state: &AppState,
    query: &CustomerListQuery,
    page: &PageRequest,
) -> MeridianResult<Page<Customer>> {
    let customers = &state.customer_service;

    if let Some(search) = query.search() {
        let filter = CustomerFilter {
            status: query.status,
            industry: query.industry().map(str::to_string),
            company_name: Some(search.to_string()),
        };
        return customers.find_customers(&filter, page).await;
    }

    match (query.status, query.industry()) {
        (Some(status), Some(industry)) => {
            customers
                .get_customers_by_status_and_industry(status, industry, page)
                .await
        }
        (Some(status), None) => customers.get_customers_by_status(status, page).await,
        (None, Some(industry)) => customers.get_customers_by_industry(industry, page).await,
        (None, None) => customers.get_all_customers(page).await,
    }
}

/// Create a new customer.
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid request body"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<Response, AppError> {
    debug!(company_name = %request.company_name, "Create customer request");

    let customer = state.create_customer.execute(request.into()).await?;
    let location = format!("/api/v1/customers/{}", customer.id);
    Ok(created(&location, CustomerResponse::from(customer)))
}

/// Get a customer by id.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer", body = CustomerResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such customer")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CustomerResponse> {
    let customer_id = parse_customer_id(&id)?;
    let customer = state.customer_service.get_customer_by_id(customer_id).await?;
    ok(CustomerResponse::from(customer))
}

/// Get a customer by email, ignoring case.
#[utoipa::path(
    get,
    path = "/customers/email/{email}",
    tag = "customers",
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "The customer", body = CustomerResponse),
        (status = 404, description = "No such customer")
    )
)]
pub async fn get_customer_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<CustomerResponse> {
    let customer = state.customer_service.get_customer_by_email(&email).await?;
    ok(CustomerResponse::from(customer))
}

/// Apply a partial update to a customer.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "The updated customer", body = CustomerResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "No such customer"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> ApiResult<CustomerResponse> {
    let customer_id = parse_customer_id(&id)?;
    debug!(%customer_id, "Update customer request");

    let customer = state
        .update_customer
        .execute(UpdateCustomerCommand {
            id: customer_id,
            changes: request.into(),
        })
        .await?;
    ok(CustomerResponse::from(customer))
}

/// Delete a customer.
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "No such customer")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let customer_id = parse_customer_id(&id)?;
    debug!(%customer_id, "Delete customer request");

    state
        .delete_customer
        .execute(DeleteCustomerCommand { id: customer_id })
        .await?;
    Ok(no_content())
}

/// Mark a customer active.
#[utoipa::path(
    post,
    path = "/customers/{id}/activate",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The activated customer", body = CustomerResponse),
        (status = 404, description = "No such customer")
    )
)]
pub async fn activate_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CustomerResponse> {
    let customer_id = parse_customer_id(&id)?;
    let customer = state
        .activate_customer
        .execute(CustomerStatusCommand { id: customer_id })
        .await?;
    ok(CustomerResponse::from(customer))
}

/// Mark a customer inactive.
#[utoipa::path(
    post,
    path = "/customers/{id}/deactivate",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The deactivated customer", body = CustomerResponse),
        (status = 404, description = "No such customer")
    )
)]
pub async fn deactivate_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CustomerResponse> {
    let customer_id = parse_customer_id(&id)?;
    let customer = state
        .deactivate_customer
        .execute(CustomerStatusCommand { id: customer_id })
        .await?;
    ok(CustomerResponse::from(customer))
}

fn parse_customer_id(id: &str) -> Result<CustomerId, AppError> {
    CustomerId::parse(id)
        .map_err(|_| AppError(MeridianError::validation(format!("Invalid customer id: {id}"))))
}
