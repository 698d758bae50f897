//! Dependency injection modules using Shaku.
//!
//! One module per storage backend:
//! - `MySqlModule`: services over the SQLx repositories and a MySQL pool
//! - `InMemoryModule`: services over process-local maps

use meridian_config::{DatabaseConfig, SecurityConfig};
use meridian_core::{MeridianResult, SystemClock};
use meridian_repository::{
    CustomerRepository, DatabasePool, DatabasePoolInterface, DatabasePoolParameters,
    InMemoryCustomerRepository, InMemoryUserRepository, MySqlCustomerRepository,
    MySqlUserRepository, UserRepository,
};
use meridian_security::{PasswordHasher, PasswordHasherParameters};
use meridian_service::{CustomerService, CustomerServiceImpl, UserService, UserServiceImpl};
use shaku::{module, HasComponent};
use std::sync::Arc;

module! {
    pub MySqlModule {
        components = [
            DatabasePool,
            SystemClock,
            PasswordHasher,
            MySqlUserRepository,
            MySqlCustomerRepository,
            UserServiceImpl,
            CustomerServiceImpl,
        ],
        providers = [],
    }
}

module! {
    pub InMemoryModule {
        components = [
            SystemClock,
            PasswordHasher,
            InMemoryUserRepository,
            InMemoryCustomerRepository,
            UserServiceImpl,
            CustomerServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the MySQL-backed module. Connects the pool; does not migrate.
pub async fn build_mysql_module(
    db_config: &DatabaseConfig,
    security_config: &SecurityConfig,
) -> MeridianResult<Arc<MySqlModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;
    let password_hasher = PasswordHasher::with_cost(security_config.password_hash_cost);

    let module = MySqlModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.pool(),
        })
        .with_component_parameters::<PasswordHasher>(PasswordHasherParameters {
            argon2: password_hasher.argon2_arc(),
        })
        .build();

    Ok(Arc::new(module))
}

/// Builds the in-memory module. Every call starts with empty stores.
#[must_use]
pub fn build_in_memory_module(security_config: &SecurityConfig) -> Arc<InMemoryModule> {
    let password_hasher = PasswordHasher::with_cost(security_config.password_hash_cost);

    let module = InMemoryModule::builder()
        .with_component_parameters::<PasswordHasher>(PasswordHasherParameters {
            argon2: password_hasher.argon2_arc(),
        })
        .build();

    Arc::new(module)
}

/// Resolves the services from any backend module.
pub trait ServiceResolver {
    fn user_service(&self) -> Arc<dyn UserService>;
    fn customer_service(&self) -> Arc<dyn CustomerService>;
}

impl<M> ServiceResolver for M
where
    M: HasComponent<dyn UserService> + HasComponent<dyn CustomerService>,
{
    fn user_service(&self) -> Arc<dyn UserService> {
        HasComponent::<dyn UserService>::resolve(self)
    }

    fn customer_service(&self) -> Arc<dyn CustomerService> {
        HasComponent::<dyn CustomerService>::resolve(self)
    }
}

/// Resolves the repositories from any backend module.
pub trait RepositoryResolver {
    fn user_repository(&self) -> Arc<dyn UserRepository>;
    fn customer_repository(&self) -> Arc<dyn CustomerRepository>;
}

impl<M> RepositoryResolver for M
where
    M: HasComponent<dyn UserRepository> + HasComponent<dyn CustomerRepository>,
{
    fn user_repository(&self) -> Arc<dyn UserRepository> {
        HasComponent::<dyn UserRepository>::resolve(self)
    }

    fn customer_repository(&self) -> Arc<dyn CustomerRepository> {
        HasComponent::<dyn CustomerRepository>::resolve(self)
    }
}

/// Resolves the database pool from modules that have one.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for MySqlModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::{Clock, PageRequest};
    use meridian_domain::{Address, NewCustomer, NewUser, UserRole};
    use meridian_security::PasswordHasherInterface;

    fn fast_hashing() -> SecurityConfig {
        SecurityConfig {
            password_hash_cost: 1,
        }
    }

    #[test]
    fn test_modules_provide_every_interface() {
        fn assert_services<T: HasComponent<dyn UserService> + HasComponent<dyn CustomerService>>() {}
        fn assert_support<
            T: HasComponent<dyn PasswordHasherInterface> + HasComponent<dyn Clock>,
        >() {
        }
        fn assert_database<T: DatabaseResolver>() {}

        assert_services::<MySqlModule>();
        assert_services::<InMemoryModule>();
        assert_support::<MySqlModule>();
        assert_support::<InMemoryModule>();
        assert_database::<MySqlModule>();
    }

    #[tokio::test]
    async fn test_in_memory_module_wires_services_to_shared_stores() {
        let module = build_in_memory_module(&fast_hashing());

        let user = module
            .user_service()
            .create_user(NewUser {
                username: "jdoe".to_string(),
                email: "jdoe@example.com".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                password: "password123".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();

        // Components are singletons within a module.
        let stored = module.user_repository().find_by_id(user.id).await.unwrap();
        assert!(stored.is_some());

        module
            .customer_service()
            .create_customer(NewCustomer {
                company_name: "ACME".to_string(),
                contact_person: "John".to_string(),
                email: "john@acme.com".to_string(),
                address: Address::default(),
                ..NewCustomer::default()
            })
            .await
            .unwrap();
        let page = module
            .customer_repository()
            .find_all(&PageRequest::first())
            .await
            .unwrap();
        assert_eq!(page.info.total_elements, 1);
    }

    #[test]
    fn test_in_memory_modules_are_independent() {
        let first = build_in_memory_module(&fast_hashing());
        let second = build_in_memory_module(&fast_hashing());
        assert!(!Arc::ptr_eq(&first.user_repository(), &second.user_repository()));
    }

    #[test]
    fn test_password_hasher_component_uses_configured_cost() {
        let module = build_in_memory_module(&fast_hashing());
        let hasher: Arc<dyn PasswordHasherInterface> = module.resolve();

        let hash = hasher.hash("password123").unwrap();
        assert!(hash.contains("m=1024"));
        assert!(hasher.verify("password123", &hash).unwrap());
    }
}
