//! # Meridian Service
//!
//! Application service layer for Meridian: user and customer services,
//! write-side use cases, and the DTOs exchanged with the REST layer.

pub mod customer_service;
pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;
pub mod usecases;

pub use customer_service::*;
pub use dto::*;
pub use r#impl::*;
pub use user_service::*;
pub use usecases::*;
