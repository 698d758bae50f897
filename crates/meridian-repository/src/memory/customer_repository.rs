//! In-memory customer repository.

use super::paginate;
use crate::sort::CUSTOMER_SORT_FIELDS;
use crate::traits::{CustomerFilter, CustomerRepository};
use meridian_core::{CustomerId, MeridianError, MeridianResult, Page, PageRequest};
use meridian_domain::Customer;
use async_trait::async_trait;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use tracing::debug;

/// Customer repository backed by a process-local map.
#[derive(Component, Default)]
#[shaku(interface = CustomerRepository)]
pub struct InMemoryCustomerRepository {
    #[shaku(default)]
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with customers.
    #[must_use]
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.customers.write();
            for customer in customers {
                map.insert(customer.id, customer);
            }
        }
        repo
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn save(&self, customer: &Customer) -> MeridianResult<Customer> {
        debug!("Saving customer in memory: {}", customer.id);

        let mut customers = self.customers.write();
        let taken = customers
            .values()
            .any(|other| other.id != customer.id && same_email(&other.email, &customer.email));
        if taken {
            return Err(MeridianError::already_exists("Customer", "email", &customer.email));
        }
        customers.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn find_by_id(&self, id: CustomerId) -> MeridianResult<Option<Customer>> {
        Ok(self.customers.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> MeridianResult<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .values()
            .find(|customer| same_email(&customer.email, email))
            .cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> MeridianResult<Page<Customer>> {
        self.find_filtered(&CustomerFilter::default(), page).await
    }

    async fn find_filtered(
        &self,
        filter: &CustomerFilter,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>> {
        let matching: Vec<Customer> = self
            .customers
            .read()
            .values()
            .filter(|customer| filter.matches(customer))
            .cloned()
            .collect();
        paginate(matching, CUSTOMER_SORT_FIELDS, page, "customers")
    }

    async fn exists_by_email(&self, email: &str) -> MeridianResult<bool> {
        Ok(self
            .customers
            .read()
            .values()
            .any(|customer| same_email(&customer.email, email)))
    }

    async fn exists_by_email_excluding_id(&self, email: &str, id: CustomerId) -> MeridianResult<bool> {
        Ok(self
            .customers
            .read()
            .values()
            .any(|customer| customer.id != id && same_email(&customer.email, email)))
    }

    async fn delete_by_id(&self, id: CustomerId) -> MeridianResult<bool> {
        Ok(self.customers.write().remove(&id).is_some())
    }

    async fn count(&self) -> MeridianResult<u64> {
        Ok(self.customers.read().len() as u64)
    }

    async fn count_by_filter(&self, filter: &CustomerFilter) -> MeridianResult<u64> {
        Ok(self
            .customers
            .read()
            .values()
            .filter(|customer| filter.matches(customer))
            .count() as u64)
    }
}

impl std::fmt::Debug for InMemoryCustomerRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCustomerRepository")
            .field("len", &self.customers.read().len())
            .finish()
    }
}
