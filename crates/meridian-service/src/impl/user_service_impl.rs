//! User service implementation.

use crate::user_service::UserService;
use meridian_core::{Clock, MeridianError, MeridianResult, Page, PageRequest, Patch, UserId};
use meridian_domain::{NewUser, User, UserChanges};
use meridian_repository::{UserFilter, UserRepository};
use meridian_security::PasswordHasherInterface;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    clock: Arc<dyn Clock>,
}

impl UserServiceImpl {
    /// Creates a user service from explicit dependencies.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            clock,
        }
    }

    async fn load(&self, id: UserId) -> MeridianResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| MeridianError::not_found("User", id))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, new_user: NewUser) -> MeridianResult<User> {
        debug!("Creating user: {}", new_user.username);

        if self.user_repository.exists_by_username(&new_user.username).await? {
            return Err(MeridianError::already_exists("User", "username", &new_user.username));
        }

        if self.user_repository.exists_by_email(&new_user.email).await? {
            return Err(MeridianError::already_exists("User", "email", &new_user.email));
        }

        let password_hash = self.password_hasher.hash(&new_user.password)?;

        let user = User::new(
            new_user.username,
            new_user.email,
            new_user.first_name,
            new_user.last_name,
            password_hash,
            new_user.role,
            self.clock.now(),
        );

        let saved_user = self.user_repository.save(&user).await?;

        info!("User created: {}", saved_user.id);
        Ok(saved_user)
    }

    async fn get_user_by_id(&self, id: UserId) -> MeridianResult<User> {
        debug!("Getting user: {}", id);
        self.load(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> MeridianResult<User> {
        debug!("Getting user by username: {}", username);

        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| MeridianError::not_found_by("User", "username", username))
    }

    async fn get_all_users(&self, page: &PageRequest) -> MeridianResult<Page<User>> {
        debug!("Listing users, page: {}, size: {}", page.page, page.size);
        self.user_repository.find_all(page).await
    }

    async fn find_users(&self, filter: &UserFilter, page: &PageRequest) -> MeridianResult<Page<User>> {
        debug!(?filter, "Finding users, page: {}, size: {}", page.page, page.size);
        self.user_repository.find_filtered(filter, page).await
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> MeridianResult<User> {
        debug!("Updating user: {}", id);

        let mut user = self.load(id).await?;

        if let Patch::Set(email) = &changes.email {
            if *email != user.email
                && self
                    .user_repository
                    .exists_by_email_excluding_id(email, id)
                    .await?
            {
                return Err(MeridianError::already_exists("User", "email", email));
            }
        }

        let now = self.clock.now();
        user.update_profile(changes.email, changes.first_name, changes.last_name, now);
        if let Patch::Set(role) = changes.role {
            user.update_role(role, now);
        }
        if let Patch::Set(active) = changes.active {
            if active {
                user.activate(now);
            } else {
                user.deactivate(now);
            }
        }

        let updated_user = self.user_repository.save(&user).await?;

        info!("User updated: {}", id);
        Ok(updated_user)
    }

    async fn delete_user(&self, id: UserId) -> MeridianResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete_by_id(id).await? {
            return Err(MeridianError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn change_password(&self, id: UserId, new_password: &str) -> MeridianResult<()> {
        debug!("Changing password for user: {}", id);

        let mut user = self.load(id).await?;

        let new_hash = self.password_hasher.hash(new_password)?;
        user.change_password(new_hash, self.clock.now());

        self.user_repository.save(&user).await?;

        info!("Password changed for user: {}", id);
        Ok(())
    }

    async fn count_users(&self, filter: &UserFilter) -> MeridianResult<u64> {
        if filter.is_empty() {
            self.user_repository.count().await
        } else {
            self.user_repository.count_by_filter(filter).await
        }
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
