//! Domain entities.

mod customer;
mod user;

pub use customer::*;
pub use user::*;
