//! Customer service trait definition.

use meridian_core::{CustomerId, Interface, MeridianResult, Page, PageRequest};
use meridian_domain::{Customer, CustomerChanges, CustomerStatus, NewCustomer};
use meridian_repository::CustomerFilter;
use async_trait::async_trait;

/// Customer service trait.
#[async_trait]
pub trait CustomerService: Interface + Send + Sync {
    /// Registers a customer.
    async fn create_customer(&self, new_customer: NewCustomer) -> MeridianResult<Customer>;

    /// Gets a customer by ID.
    async fn get_customer_by_id(&self, id: CustomerId) -> MeridianResult<Customer>;

    /// Gets a customer by email.
    async fn get_customer_by_email(&self, email: &str) -> MeridianResult<Customer>;

    /// Lists all customers with pagination.
    async fn get_all_customers(&self, page: &PageRequest) -> MeridianResult<Page<Customer>>;

    /// Lists customers in a status.
    async fn get_customers_by_status(
        &self,
        status: CustomerStatus,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>>;

    /// Lists customers in an industry.
    async fn get_customers_by_industry(
        &self,
        industry: &str,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>>;

    /// Lists customers in a status and an industry, as one query.
    async fn get_customers_by_status_and_industry(
        &self,
        status: CustomerStatus,
        industry: &str,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>>;

    /// Lists customers whose company name contains a fragment, ignoring case.
    async fn search_customers(&self, company_name: &str, page: &PageRequest) -> MeridianResult<Page<Customer>>;

    /// Lists customers matching an arbitrary filter.
    async fn find_customers(
        &self,
        filter: &CustomerFilter,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>>;

    /// Applies a partial update.
    async fn update_customer(&self, id: CustomerId, changes: CustomerChanges) -> MeridianResult<Customer>;

    /// Deletes a customer permanently.
    async fn delete_customer(&self, id: CustomerId) -> MeridianResult<()>;

    /// Sets the status to `Active`.
    async fn activate_customer(&self, id: CustomerId) -> MeridianResult<Customer>;

    /// Sets the status to `Inactive`.
    async fn deactivate_customer(&self, id: CustomerId) -> MeridianResult<Customer>;

    /// Counts customers matching a filter.
    async fn count_customers(&self, filter: &CustomerFilter) -> MeridianResult<u64>;
}
