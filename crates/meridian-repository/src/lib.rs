//! # Meridian Repository
//!
//! Persistence ports and their adapters:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn CustomerRepository>
//! MySqlUserRepository, MySqlCustomerRepository   (SQLx)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! [`memory`] holds map-backed adapters with the same contract, used by the
//! `memory` storage backend and throughout the test suites.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod sort;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use meridian_core::UserId;
    use meridian_domain::{User, UserRole};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_adapters_are_usable_as_trait_objects() {
        let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let user = User::new(
            "jdoe".to_string(),
            "jdoe@example.com".to_string(),
            "John".to_string(),
            "Doe".to_string(),
            "hash".to_string(),
            UserRole::User,
            Utc::now(),
        );

        repo.save(&user).await.unwrap();
        assert!(repo.exists_by_username("jdoe").await.unwrap());
        assert!(repo.find_by_id(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generated_mock_satisfies_port() {
        let mut mock = MockUserRepository::new();
        mock.expect_count().times(1).returning(|| Ok(7));

        let repo: Arc<dyn UserRepository> = Arc::new(mock);
        assert_eq!(repo.count().await.unwrap(), 7);
    }
}
