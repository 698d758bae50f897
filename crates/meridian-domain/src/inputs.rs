//! Creation and change sets accepted by the domain services.

use crate::{Address, CustomerStatus, UserRole};
use meridian_core::Patch;
use std::fmt;

/// Everything needed to register a user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Raw password; hashed before the user is built.
    pub password: String,
    pub role: UserRole,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Partial update of a user. Every `Unchanged` field is left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Patch<String>,
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    pub role: Patch<UserRole>,
    pub active: Patch<bool>,
}

/// Everything needed to register a customer. A missing status means
/// `Prospect`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Address,
    pub industry: Option<String>,
    pub status: Option<CustomerStatus>,
}

/// Partial update of a customer. A set address replaces the stored one
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    pub company_name: Patch<String>,
    pub contact_person: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub address: Patch<Address>,
    pub industry: Patch<String>,
    pub status: Patch<CustomerStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_debug_hides_password() {
        let new_user = NewUser {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password: "hunter2hunter2".to_string(),
            role: UserRole::User,
        };

        let debug = format!("{new_user:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_default_changes_touch_nothing() {
        let changes = CustomerChanges::default();
        assert!(!changes.company_name.is_set());
        assert!(!changes.address.is_set());
        assert!(!changes.status.is_set());
    }
}
