//! Customer entity.

use crate::{Address, CustomerStatus};
use chrono::{DateTime, Utc};
use meridian_core::{CustomerId, Entity, Patch};
use serde::{Deserialize, Serialize};

/// A company the business sells to, with one contact person.
///
/// `email` is unique across customers, independently of user emails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub industry: Option<String>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer in the `Prospect` status.
    #[must_use]
    pub fn new(
        company_name: String,
        contact_person: String,
        email: String,
        address: Address,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            company_name,
            contact_person,
            email,
            phone: None,
            address: address.into_option(),
            industry: None,
            status: CustomerStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Updates company name, contact, email and phone in one step.
    /// Each unchanged part is kept independently.
    pub fn update_basic_info(
        &mut self,
        company_name: Patch<String>,
        contact_person: Patch<String>,
        email: Patch<String>,
        phone: Patch<String>,
        now: DateTime<Utc>,
    ) {
        company_name.apply_to(&mut self.company_name);
        contact_person.apply_to(&mut self.contact_person);
        email.apply_to(&mut self.email);
        phone.apply_to_option(&mut self.phone);
        self.updated_at = now;
    }

    /// Replaces the whole address.
    pub fn update_address(&mut self, address: Address, now: DateTime<Utc>) {
        self.address = address.into_option();
        self.updated_at = now;
    }

    /// Sets the industry.
    pub fn update_industry(&mut self, industry: Option<String>, now: DateTime<Utc>) {
        self.industry = industry;
        self.updated_at = now;
    }

    /// Sets the status.
    pub fn update_status(&mut self, status: CustomerStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Marks the customer active.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.update_status(CustomerStatus::Active, now);
    }

    /// Marks the customer inactive.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.update_status(CustomerStatus::Inactive, now);
    }

    /// Returns true if the customer is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

impl Entity<CustomerId> for Customer {
    fn id(&self) -> &CustomerId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
    }

    fn address() -> Address {
        Address {
            street: Some("123 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: None,
            zip_code: Some("62701".to_string()),
            country: Some("USA".to_string()),
        }
    }

    fn acme() -> Customer {
        Customer::new(
            "ACME".to_string(),
            "John Doe".to_string(),
            "john@acme.com".to_string(),
            address(),
            t0(),
        )
    }

    #[test]
    fn test_new_customer_is_prospect() {
        let customer = acme();
        assert_eq!(customer.status, CustomerStatus::Prospect);
        assert_eq!(customer.address, Some(address()));
        assert_eq!(customer.phone, None);
        assert_eq!(customer.industry, None);
        assert_eq!(customer.created_at, customer.updated_at);
        assert!(!customer.is_active());
    }

    #[test]
    fn test_update_basic_info_only_touches_set_fields() {
        let mut customer = acme();
        let later = t0() + Duration::hours(1);

        customer.update_basic_info(
            Patch::Set("Beta".to_string()),
            Patch::Unchanged,
            Patch::Unchanged,
            Patch::Unchanged,
            later,
        );

        assert_eq!(customer.company_name, "Beta");
        assert_eq!(customer.contact_person, "John Doe");
        assert_eq!(customer.email, "john@acme.com");
        assert_eq!(customer.phone, None);
        assert_eq!(customer.updated_at, later);
    }

    #[test]
    fn test_update_address_replaces_wholesale() {
        let mut customer = acme();
        let replacement = Address {
            city: Some("Berlin".to_string()),
            ..Address::default()
        };

        customer.update_address(replacement.clone(), t0() + Duration::minutes(1));

        assert_eq!(customer.address, Some(replacement));
    }

    #[test]
    fn test_empty_address_clears() {
        let mut customer = acme();
        customer.update_address(Address::default(), t0());
        assert_eq!(customer.address, None);
    }

    #[test]
    fn test_status_transitions_are_unconstrained() {
        let mut customer = acme();
        let t1 = t0() + Duration::seconds(1);

        customer.deactivate(t1);
        assert_eq!(customer.status, CustomerStatus::Inactive);
        assert_eq!(customer.updated_at, t1);

        customer.update_status(CustomerStatus::Prospect, t1);
        customer.activate(t1 + Duration::seconds(1));
        assert!(customer.is_active());
        assert_eq!(customer.updated_at, t1 + Duration::seconds(1));
    }

    #[test]
    fn test_update_industry_stamps() {
        let mut customer = acme();
        let t1 = t0() + Duration::days(1);
        customer.update_industry(Some("Manufacturing".to_string()), t1);
        assert_eq!(customer.industry.as_deref(), Some("Manufacturing"));
        assert_eq!(customer.updated_at, t1);
    }
}
