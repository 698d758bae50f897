//! Customer commands.

use crate::customer_service::CustomerService;
use meridian_core::{CustomerId, MeridianResult, UseCase};
use meridian_domain::{Customer, CustomerChanges, NewCustomer};
use async_trait::async_trait;
use std::sync::Arc;

/// Update a customer.
#[derive(Debug, Clone)]
pub struct UpdateCustomerCommand {
    pub id: CustomerId,
    pub changes: CustomerChanges,
}

/// Delete a customer.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCustomerCommand {
    pub id: CustomerId,
}

/// Move a customer to `Active` or `Inactive`.
#[derive(Debug, Clone, Copy)]
pub struct CustomerStatusCommand {
    pub id: CustomerId,
}

macro_rules! customer_use_case {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            customers: Arc<dyn CustomerService>,
        }

        impl $name {
            #[must_use]
            pub fn new(customers: Arc<dyn CustomerService>) -> Self {
                Self { customers }
            }
        }
    };
}

customer_use_case!(
    /// Registers a customer.
    CreateCustomerUseCase
);
customer_use_case!(
    /// Applies a partial customer update.
    UpdateCustomerUseCase
);
customer_use_case!(
    /// Deletes a customer.
    DeleteCustomerUseCase
);
customer_use_case!(
    /// Marks a customer active.
    ActivateCustomerUseCase
);
customer_use_case!(
    /// Marks a customer inactive.
    DeactivateCustomerUseCase
);

#[async_trait]
impl UseCase<NewCustomer, Customer> for CreateCustomerUseCase {
    async fn execute(&self, command: NewCustomer) -> MeridianResult<Customer> {
        self.customers.create_customer(command).await
    }
}

#[async_trait]
impl UseCase<UpdateCustomerCommand, Customer> for UpdateCustomerUseCase {
    async fn execute(&self, command: UpdateCustomerCommand) -> MeridianResult<Customer> {
        self.customers.update_customer(command.id, command.changes).await
    }
}

#[async_trait]
impl UseCase<DeleteCustomerCommand, ()> for DeleteCustomerUseCase {
    async fn execute(&self, command: DeleteCustomerCommand) -> MeridianResult<()> {
        self.customers.delete_customer(command.id).await
    }
}

#[async_trait]
impl UseCase<CustomerStatusCommand, Customer> for ActivateCustomerUseCase {
    async fn execute(&self, command: CustomerStatusCommand) -> MeridianResult<Customer> {
        self.customers.activate_customer(command.id).await
    }
}

#[async_trait]
impl UseCase<CustomerStatusCommand, Customer> for DeactivateCustomerUseCase {
    async fn execute(&self, command: CustomerStatusCommand) -> MeridianResult<Customer> {
        self.customers.deactivate_customer(command.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CustomerServiceImpl;
    use chrono::Utc;
    use meridian_core::{FixedClock, Patch};
    use meridian_domain::{Address, CustomerStatus};
    use meridian_repository::InMemoryCustomerRepository;

    fn customers() -> Arc<dyn CustomerService> {
        Arc::new(CustomerServiceImpl::new(
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(FixedClock::at(Utc::now())),
        ))
    }

    #[tokio::test]
    async fn test_customer_commands_flow_through_service() {
        let customers = customers();
        let created = CreateCustomerUseCase::new(customers.clone())
            .execute(NewCustomer {
                company_name: "ACME".to_string(),
                contact_person: "John Doe".to_string(),
                email: "john@acme.com".to_string(),
                address: Address::default(),
                ..NewCustomer::default()
            })
            .await
            .unwrap();
        assert_eq!(created.status, CustomerStatus::Prospect);

        let command = CustomerStatusCommand { id: created.id };
        let active = ActivateCustomerUseCase::new(customers.clone()).execute(command).await.unwrap();
        assert_eq!(active.status, CustomerStatus::Active);
        let inactive = DeactivateCustomerUseCase::new(customers.clone())
            .execute(command)
            .await
            .unwrap();
        assert_eq!(inactive.status, CustomerStatus::Inactive);

        let renamed = UpdateCustomerUseCase::new(customers.clone())
            .execute(UpdateCustomerCommand {
                id: created.id,
                changes: CustomerChanges {
                    company_name: Patch::Set("Beta".to_string()),
                    ..CustomerChanges::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(renamed.company_name, "Beta");

        DeleteCustomerUseCase::new(customers.clone())
            .execute(DeleteCustomerCommand { id: created.id })
            .await
            .unwrap();
        assert!(customers.get_customer_by_id(created.id).await.unwrap_err().is_not_found());
    }
}
