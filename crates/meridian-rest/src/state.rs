//! Application state for Axum handlers.

use meridian_core::HealthCheck;
use meridian_service::{
    ActivateCustomerUseCase, ChangePasswordUseCase, CreateCustomerUseCase, CreateUserUseCase,
    CustomerService, DeactivateCustomerUseCase, DeleteCustomerUseCase, DeleteUserUseCase,
    UpdateCustomerUseCase, UpdateUserUseCase, UserService,
};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
///
/// Reads go straight to the services; writes go through the use cases.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub customer_service: Arc<dyn CustomerService>,
    pub create_user: CreateUserUseCase,
    pub update_user: UpdateUserUseCase,
    pub delete_user: DeleteUserUseCase,
    pub change_password: ChangePasswordUseCase,
    pub create_customer: CreateCustomerUseCase,
    pub update_customer: UpdateCustomerUseCase,
    pub delete_customer: DeleteCustomerUseCase,
    pub activate_customer: ActivateCustomerUseCase,
    pub deactivate_customer: DeactivateCustomerUseCase,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state, wiring the use cases to the services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        customer_service: Arc<dyn CustomerService>,
    ) -> Self {
        Self {
            create_user: CreateUserUseCase::new(user_service.clone()),
            update_user: UpdateUserUseCase::new(user_service.clone()),
            delete_user: DeleteUserUseCase::new(user_service.clone()),
            change_password: ChangePasswordUseCase::new(user_service.clone()),
            create_customer: CreateCustomerUseCase::new(customer_service.clone()),
            update_customer: UpdateCustomerUseCase::new(customer_service.clone()),
            delete_customer: DeleteCustomerUseCase::new(customer_service.clone()),
            activate_customer: ActivateCustomerUseCase::new(customer_service.clone()),
            deactivate_customer: DeactivateCustomerUseCase::new(customer_service.clone()),
            user_service,
            customer_service,
            health_checks: Vec::new(),
        }
    }

    /// Creates the application state by resolving services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn UserService> + HasComponent<dyn CustomerService>,
    {
        let user_service: Arc<dyn UserService> = module.resolve();
        let customer_service: Arc<dyn CustomerService> = module.resolve();
        Self::new(user_service, customer_service)
    }

    /// Adds a dependency probed by the readiness endpoint.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
