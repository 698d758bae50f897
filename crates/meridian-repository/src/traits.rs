//! Repository trait definitions.
//!
//! Services depend only on these ports; the MySQL and in-memory adapters
//! both implement them.

use meridian_core::{CustomerId, Interface, MeridianResult, Page, PageRequest, UserId};
use meridian_domain::{Customer, CustomerStatus, User, UserRole};
use async_trait::async_trait;

/// Optional criteria for listing users. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

impl UserFilter {
    /// Returns true if no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.role.is_none() && self.active.is_none()
    }

    /// Returns true if the user satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |role| user.role == role)
            && self.active.map_or(true, |active| user.active == active)
    }
}

/// Optional criteria for listing customers. `None` fields match everything.
///
/// `industry` is an exact, case-insensitive match. `company_name` is a
/// case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub status: Option<CustomerStatus>,
    pub industry: Option<String>,
    pub company_name: Option<String>,
}

impl CustomerFilter {
    /// Filter on status alone.
    #[must_use]
    pub fn by_status(status: CustomerStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Filter on industry alone.
    #[must_use]
    pub fn by_industry(industry: impl Into<String>) -> Self {
        Self {
            industry: Some(industry.into()),
            ..Self::default()
        }
    }

    /// Filter on a company name fragment alone.
    #[must_use]
    pub fn by_company_name(fragment: impl Into<String>) -> Self {
        Self {
            company_name: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// Returns true if no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.industry.is_none() && self.company_name.is_none()
    }

    /// Returns true if the customer satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        let status_ok = self.status.map_or(true, |status| customer.status == status);
        let industry_ok = self.industry.as_deref().map_or(true, |wanted| {
            customer
                .industry
                .as_deref()
                .is_some_and(|industry| industry.to_lowercase() == wanted.to_lowercase())
        });
        let name_ok = self.company_name.as_deref().map_or(true, |fragment| {
            customer
                .company_name
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        });
        status_ok && industry_ok && name_ok
    }
}

/// User repository trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts the user, or replaces the stored record with the same id.
    /// Returns the persisted state.
    async fn save(&self, user: &User) -> MeridianResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> MeridianResult<Option<User>>;

    /// Finds a user by exact username.
    async fn find_by_username(&self, username: &str) -> MeridianResult<Option<User>>;

    /// Finds a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> MeridianResult<Option<User>>;

    /// Lists users one page at a time.
    async fn find_all(&self, page: &PageRequest) -> MeridianResult<Page<User>>;

    /// Lists users matching a filter.
    async fn find_filtered(&self, filter: &UserFilter, page: &PageRequest) -> MeridianResult<Page<User>>;

    /// Checks if a username is taken.
    async fn exists_by_username(&self, username: &str) -> MeridianResult<bool>;

    /// Checks if an email is taken.
    async fn exists_by_email(&self, email: &str) -> MeridianResult<bool>;

    /// Checks if an email is taken by any user other than `id`.
    async fn exists_by_email_excluding_id(&self, email: &str, id: UserId) -> MeridianResult<bool>;

    /// Deletes a user. Returns false if nothing was deleted.
    async fn delete_by_id(&self, id: UserId) -> MeridianResult<bool>;

    /// Counts all users.
    async fn count(&self) -> MeridianResult<u64>;

    /// Counts users matching a filter.
    async fn count_by_filter(&self, filter: &UserFilter) -> MeridianResult<u64>;
}

/// Customer repository trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Interface + Send + Sync {
    /// Inserts the customer, or replaces the stored record with the same id.
    /// Returns the persisted state.
    async fn save(&self, customer: &Customer) -> MeridianResult<Customer>;

    /// Finds a customer by ID.
    async fn find_by_id(&self, id: CustomerId) -> MeridianResult<Option<Customer>>;

    /// Finds a customer by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> MeridianResult<Option<Customer>>;

    /// Lists customers one page at a time.
    async fn find_all(&self, page: &PageRequest) -> MeridianResult<Page<Customer>>;

    /// Lists customers matching a filter.
    async fn find_filtered(
        &self,
        filter: &CustomerFilter,
        page: &PageRequest,
    ) -> MeridianResult<Page<Customer>>;

    /// Checks if an email is taken.
    async fn exists_by_email(&self, email: &str) -> MeridianResult<bool>;

    /// Checks if an email is taken by any customer other than `id`.
    async fn exists_by_email_excluding_id(&self, email: &str, id: CustomerId) -> MeridianResult<bool>;

    /// Deletes a customer. Returns false if nothing was deleted.
    async fn delete_by_id(&self, id: CustomerId) -> MeridianResult<bool>;

    /// Counts all customers.
    async fn count(&self) -> MeridianResult<u64>;

    /// Counts customers matching a filter.
    async fn count_by_filter(&self, filter: &CustomerFilter) -> MeridianResult<u64>;
}
