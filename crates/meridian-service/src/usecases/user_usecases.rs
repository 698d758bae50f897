//! User commands.

use crate::user_service::UserService;
use meridian_core::{MeridianResult, UseCase, UserId};
use meridian_domain::{NewUser, User, UserChanges};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Update a user's profile, role or active flag.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub id: UserId,
    pub changes: UserChanges,
}

/// Delete a user.
#[derive(Debug, Clone, Copy)]
pub struct DeleteUserCommand {
    pub id: UserId,
}

/// Replace a user's password.
#[derive(Clone)]
pub struct ChangePasswordCommand {
    pub id: UserId,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordCommand")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Registers a user.
#[derive(Clone)]
pub struct CreateUserUseCase {
    users: Arc<dyn UserService>,
}

impl CreateUserUseCase {
    #[must_use]
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UseCase<NewUser, User> for CreateUserUseCase {
    async fn execute(&self, command: NewUser) -> MeridianResult<User> {
        self.users.create_user(command).await
    }
}

/// Applies a partial user update.
#[derive(Clone)]
pub struct UpdateUserUseCase {
    users: Arc<dyn UserService>,
}

impl UpdateUserUseCase {
    #[must_use]
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UseCase<UpdateUserCommand, User> for UpdateUserUseCase {
    async fn execute(&self, command: UpdateUserCommand) -> MeridianResult<User> {
        self.users.update_user(command.id, command.changes).await
    }
}

/// Deletes a user.
#[derive(Clone)]
pub struct DeleteUserUseCase {
    users: Arc<dyn UserService>,
}

impl DeleteUserUseCase {
    #[must_use]
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UseCase<DeleteUserCommand, ()> for DeleteUserUseCase {
    async fn execute(&self, command: DeleteUserCommand) -> MeridianResult<()> {
        self.users.delete_user(command.id).await
    }
}

/// Replaces a user's password.
#[derive(Clone)]
pub struct ChangePasswordUseCase {
    users: Arc<dyn UserService>,
}

impl ChangePasswordUseCase {
    #[must_use]
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UseCase<ChangePasswordCommand, ()> for ChangePasswordUseCase {
    async fn execute(&self, command: ChangePasswordCommand) -> MeridianResult<()> {
        self.users.change_password(command.id, &command.new_password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserServiceImpl;
    use chrono::{TimeZone, Utc};
    use meridian_core::{FixedClock, Patch};
    use meridian_domain::UserRole;
    use meridian_repository::InMemoryUserRepository;
    use meridian_security::PasswordHasher;

    fn users() -> Arc<dyn UserService> {
        Arc::new(UserServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(PasswordHasher::with_cost(1)),
            Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())),
        ))
    }

    fn new_user() -> NewUser {
        NewUser {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            password: "password123".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_user_commands_flow_through_service() {
        let users = users();
        let created = CreateUserUseCase::new(users.clone()).execute(new_user()).await.unwrap();

        let updated = UpdateUserUseCase::new(users.clone())
            .execute(UpdateUserCommand {
                id: created.id,
                changes: UserChanges {
                    last_name: Patch::Set("Smith".to_string()),
                    ..UserChanges::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.last_name, "Smith");

        ChangePasswordUseCase::new(users.clone())
            .execute(ChangePasswordCommand {
                id: created.id,
                new_password: "another-secret".to_string(),
            })
            .await
            .unwrap();

        DeleteUserUseCase::new(users.clone())
            .execute(DeleteUserCommand { id: created.id })
            .await
            .unwrap();
        assert!(users.get_user_by_id(created.id).await.unwrap_err().is_not_found());
    }

    #[test]
    fn test_change_password_command_debug_hides_secret() {
        let command = ChangePasswordCommand {
            id: UserId::new(),
            new_password: "top-secret-value".to_string(),
        };
        assert!(!format!("{command:?}").contains("top-secret"));
    }
}
