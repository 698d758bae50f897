//! Data Transfer Objects (DTOs).

mod customer_dto;
mod user_dto;

pub use customer_dto::*;
pub use user_dto::*;
