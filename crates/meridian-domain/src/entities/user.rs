//! User entity.

use crate::UserRole;
use chrono::{DateTime, Utc};
use meridian_core::{Entity, Patch, UserId};
use serde::{Deserialize, Serialize};

/// A person with an account in the system.
///
/// `username` is fixed at creation. `username` and `email` are each unique
/// across users; the store enforces that, the entity does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username.
    pub username: String,

    /// User's email address.
    pub email: String,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// One-way hash of the user's password (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// User's role.
    pub role: UserRole,

    /// Whether the account is active.
    pub active: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, active user.
    #[must_use]
    pub fn new(
        username: String,
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            first_name,
            last_name,
            password_hash,
            role,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the user's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Updates email and names in one step. Unchanged parts are kept.
    pub fn update_profile(
        &mut self,
        email: Patch<String>,
        first_name: Patch<String>,
        last_name: Patch<String>,
        now: DateTime<Utc>,
    ) {
        email.apply_to(&mut self.email);
        first_name.apply_to(&mut self.first_name);
        last_name.apply_to(&mut self.last_name);
        self.updated_at = now;
    }

    /// Changes the user's role.
    pub fn update_role(&mut self, role: UserRole, now: DateTime<Utc>) {
        self.role = role;
        self.updated_at = now;
    }

    /// Activates the account.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.active = true;
        self.updated_at = now;
    }

    /// Deactivates the account.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }

    /// Replaces the stored password hash.
    pub fn change_password(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> &UserId {
        &self.id
    }
}
