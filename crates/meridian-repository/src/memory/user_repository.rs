//! In-memory user repository.

use super::paginate;
use crate::sort::USER_SORT_FIELDS;
use crate::traits::{UserFilter, UserRepository};
use meridian_core::{MeridianError, MeridianResult, Page, PageRequest, UserId};
use meridian_domain::User;
use async_trait::async_trait;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use tracing::debug;

/// User repository backed by a process-local map.
#[derive(Component, Default)]
#[shaku(interface = UserRepository)]
pub struct InMemoryUserRepository {
    #[shaku(default)]
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.users.write();
            for user in users {
                map.insert(user.id, user);
            }
        }
        repo
    }

    fn collect(&self, filter: &UserFilter) -> Vec<User> {
        self.users
            .read()
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect()
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> MeridianResult<User> {
        debug!("Saving user in memory: {}", user.id);

        let mut users = self.users.write();
        for other in users.values().filter(|other| other.id != user.id) {
            if other.username == user.username {
                return Err(MeridianError::already_exists("User", "username", &user.username));
            }
            if same_email(&other.email, &user.email) {
                return Err(MeridianError::already_exists("User", "email", &user.email));
            }
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: UserId) -> MeridianResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> MeridianResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> MeridianResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| same_email(&user.email, email))
            .cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> MeridianResult<Page<User>> {
        self.find_filtered(&UserFilter::default(), page).await
    }

    async fn find_filtered(&self, filter: &UserFilter, page: &PageRequest) -> MeridianResult<Page<User>> {
        paginate(self.collect(filter), USER_SORT_FIELDS, page, "users")
    }

    async fn exists_by_username(&self, username: &str) -> MeridianResult<bool> {
        Ok(self.users.read().values().any(|user| user.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> MeridianResult<bool> {
        Ok(self
            .users
            .read()
            .values()
            .any(|user| same_email(&user.email, email)))
    }

    async fn exists_by_email_excluding_id(&self, email: &str, id: UserId) -> MeridianResult<bool> {
        Ok(self
            .users
            .read()
            .values()
            .any(|user| user.id != id && same_email(&user.email, email)))
    }

    async fn delete_by_id(&self, id: UserId) -> MeridianResult<bool> {
        Ok(self.users.write().remove(&id).is_some())
    }

    async fn count(&self) -> MeridianResult<u64> {
        Ok(self.users.read().len() as u64)
    }

    async fn count_by_filter(&self, filter: &UserFilter) -> MeridianResult<u64> {
        Ok(self.users.read().values().filter(|user| filter.matches(user)).count() as u64)
    }
}

impl std::fmt::Debug for InMemoryUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryUserRepository")
            .field("len", &self.users.read().len())
            .finish()
    }
}
