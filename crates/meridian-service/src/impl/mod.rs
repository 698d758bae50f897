//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod customer_service_impl;
pub mod user_service_impl;

pub use customer_service_impl::CustomerServiceImpl;
pub use user_service_impl::UserServiceImpl;
