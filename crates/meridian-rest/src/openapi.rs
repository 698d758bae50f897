//! OpenAPI documentation for the REST API.

use crate::controllers::{ComponentHealth, HealthResponse, ReadinessResponse};
use meridian_core::{ErrorResponse, FieldError};
use meridian_domain::{CustomerStatus, UserRole};
use meridian_service::{
    AddressDto, ChangePasswordRequest, CreateCustomerRequest, CreateUserRequest,
    CustomerPageResponse, CustomerResponse, UpdateCustomerRequest, UpdateUserRequest,
    UserPageResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Meridian API.
///
/// Successful bodies are wrapped as `{"success": true, "data": ...}` and
/// failures as `{"success": false, "error": ErrorResponse}`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meridian API",
        version = "1.0.0",
        description = "User and customer management API",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::get_user_by_username,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::user_controller::change_password,
        crate::controllers::customer_controller::list_customers,
        crate::controllers::customer_controller::create_customer,
        crate::controllers::customer_controller::get_customer,
        crate::controllers::customer_controller::get_customer_by_email,
        crate::controllers::customer_controller::update_customer,
        crate::controllers::customer_controller::delete_customer,
        crate::controllers::customer_controller::activate_customer,
        crate::controllers::customer_controller::deactivate_customer,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserRole,
            CustomerStatus,
            ErrorResponse,
            FieldError,
            CreateUserRequest,
            UpdateUserRequest,
            ChangePasswordRequest,
            UserResponse,
            UserPageResponse,
            AddressDto,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerResponse,
            CustomerPageResponse,
            HealthResponse,
            ComponentHealth,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "customers", description = "Customer management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/users",
            "/users/{id}",
            "/users/username/{username}",
            "/users/{id}/password",
            "/customers",
            "/customers/{id}",
            "/customers/email/{email}",
            "/customers/{id}/activate",
            "/customers/{id}/deactivate",
            "/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
