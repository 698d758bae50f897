//! Customer service implementation.

use crate::customer_service::CustomerService;
use meridian_core::{Clock, CustomerId, MeridianError, MeridianResult, Page, PageRequest, Patch};
use meridian_domain::{Customer, CustomerChanges, CustomerStatus, NewCustomer};
use meridian_repository::{CustomerFilter, CustomerRepository};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Customer service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = CustomerService)]
pub struct CustomerServiceImpl {
    #[shaku(inject)]
    customer_repository: Arc<dyn CustomerRepository>,
    #[shaku(inject)]
    clock: Arc<dyn Clock>,
}

impl CustomerServiceImpl {
    /// Creates a customer service from explicit dependencies.
    #[must_use]
    pub fn new(customer_repository: Arc<dyn CustomerRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            customer_repository,
            clock,
        }
    }

    async fn load(&self, id: CustomerId) -> MeridianResult<Customer> {
        self.customer_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| MeridianError::not_found("Customer", id))
    }

    async fn set_status(&self, id: CustomerId, status: CustomerStatus) -> MeridianResult<Customer> {
        let mut customer = self.load(id).await?;
        customer.update_status(status, self.clock.now());

        let saved = self.customer_repository.save(&customer).await?;

        info!("Customer {} is now {}", id, status);
        Ok(saved)
    }
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn create_customer(&self, new_customer: NewCustomer) -> MeridianResult<Customer> {
        debug!("Creating customer: {}", new_customer.company_name);

        if self.customer_repository.exists_by_email(&new_customer.email).await? {
            return Err(MeridianError::already_exists("Customer", "email", &new_customer.email));
        }

        let now = self.clock.now();
        let mut customer = Customer::new(
            new_customer.company_name,
            new_customer.contact_person,
            new_customer.email,
            new_customer.address,
            now,
        );
        customer.update_basic_info(
            Patch::Unchanged,
            Patch::Unchanged,
            Patch::Unchanged,
            Patch::from(new_customer.phone),
            now,
        );
        customer.update_industry(new_customer.industry, now);
        if let Some(status) = new_customer.status {
            customer.update_status(status, now);
        }

        let saved = self.customer_repository.save(&customer).await?;

        info!("Customer created: {}", saved.id);
        Ok(saved)
    }

    async fn get_customer_by_id(&self, id: CustomerId) -> MeridianResult<Customer> {
        debug!("Getting customer: {}", id);
        self.load(id).await
    }

    async fn get_customer_by_email(&self, email: &str) -> MeridianResult<Customer> {
        debug!("Getting customer by email: {}", email);

        self.customer_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| MeridianError::not_found_by("Customer", "email", email))
    }

    async fn get_all_customers(&self, page: &PageRequest) -> MeridianResult<Page<Customer>> {
        debug!("Listing customers, page: {}, size: {}", page.page, page.size);
        self.customer_repository.find_all(page).await
    }

    async fn get_customers_by_status(
        &self,
        status: CustomerStatus,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>> {
        debug!("Listing customers by status: {}", status);
        self.customer_repository
            .find_filtered(&CustomerFilter::by_status(status), page)
            .await
    }

    async fn get_customers_by_industry(
        &self,
        industry: &str,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>> {
        debug!("Listing customers by industry: {}", industry);
        self.customer_repository
            .find_filtered(&CustomerFilter::by_industry(industry), page)
            .await
    }

    async fn get_customers_by_status_and_industry(
        &self,
        status: CustomerStatus,
        industry: &str,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>> {
        debug!("Listing customers by status {} and industry {}", status, industry);
        let filter = CustomerFilter {
            status: Some(status),
            industry: Some(industry.to_string()),
            company_name: None,
        };
        self.customer_repository.find_filtered(&filter, page).await
    }

    async fn search_customers(&self, company_name: &str, page: &PageRequest) -> MeridianResult<Page<Customer>> {
        debug!("Searching customers by company name: {}", company_name);
        self.customer_repository
            .find_filtered(&CustomerFilter::by_company_name(company_name), page)
            .await
    }

    async fn find_customers(
        &self,
        filter: &CustomerFilter,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>> {
        debug!(?filter, "Finding customers, page: {}, size: {}", page.page, page.size);
        self.customer_repository.find_filtered(filter, page).await
    }

    async fn update_customer(&self, id: CustomerId, changes: CustomerChanges) -> MeridianResult<Customer> {
        debug!("Updating customer: {}", id);

        let mut customer = self.load(id).await?;

        if let Patch::Set(email) = &changes.email {
            if *email != customer.email
                && self
                    .customer_repository
                    .exists_by_email_excluding_id(email, id)
                    .await?
            {
                return Err(MeridianError::already_exists("Customer", "email", email));
            }
        }

        let now = self.clock.now();
        customer.update_basic_info(
            changes.company_name,
            changes.contact_person,
            changes.email,
            changes.phone,
            now,
        );
        if let Patch::Set(address) = changes.address {
            customer.update_address(address, now);
        }
        if let Patch::Set(industry) = changes.industry {
            customer.update_industry(Some(industry), now);
        }
        if let Patch::Set(status) = changes.status {
            customer.update_status(status, now);
        }

        let saved = self.customer_repository.save(&customer).await?;

        info!("Customer updated: {}", id);
        Ok(saved)
    }

    async fn delete_customer(&self, id: CustomerId) -> MeridianResult<()> {
        debug!("Deleting customer: {}", id);

        if !self.customer_repository.delete_by_id(id).await? {
            return Err(MeridianError::not_found("Customer", id));
        }

        info!("Customer deleted: {}", id);
        Ok(())
    }

    async fn activate_customer(&self, id: CustomerId) -> MeridianResult<Customer> {
        debug!("Activating customer: {}", id);
        self.set_status(id, CustomerStatus::Active).await
    }

    async fn deactivate_customer(&self, id: CustomerId) -> MeridianResult<Customer> {
        debug!("Deactivating customer: {}", id);
        self.set_status(id, CustomerStatus::Inactive).await
    }

    async fn count_customers(&self, filter: &CustomerFilter) -> MeridianResult<u64> {
        if filter.is_empty() {
            self.customer_repository.count().await
        } else {
            self.customer_repository.count_by_filter(filter).await
        }
    }
}

impl std::fmt::Debug for CustomerServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerServiceImpl").finish_non_exhaustive()
    }
}
