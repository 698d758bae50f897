//! User service trait definition.

use meridian_core::{Interface, MeridianResult, Page, PageRequest, UserId};
use meridian_domain::{NewUser, User, UserChanges};
use meridian_repository::UserFilter;
use async_trait::async_trait;

/// User service trait.
///
/// Owns the username and email uniqueness rules and turns absent users into
/// `NotFound` errors.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Registers a user. The username is checked before the email.
    async fn create_user(&self, new_user: NewUser) -> MeridianResult<User>;

    /// Gets a user by ID.
    async fn get_user_by_id(&self, id: UserId) -> MeridianResult<User>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str) -> MeridianResult<User>;

    /// Lists all users with pagination.
    async fn get_all_users(&self, page: &PageRequest) -> MeridianResult<Page<User>>;

    /// Lists users matching a filter.
    async fn find_users(&self, filter: &UserFilter, page: &PageRequest) -> MeridianResult<Page<User>>;

    /// Applies a partial update.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> MeridianResult<User>;

    /// Deletes a user permanently.
    async fn delete_user(&self, id: UserId) -> MeridianResult<()>;

    /// Replaces a user's password.
    async fn change_password(&self, id: UserId, new_password: &str) -> MeridianResult<()>;

    /// Counts users matching a filter.
    async fn count_users(&self, filter: &UserFilter) -> MeridianResult<u64>;
}
