//! Domain value objects.

mod address;
mod customer_status;
mod role;

pub use address::*;
pub use customer_status::*;
pub use role::*;
