//! Use cases: one command in, one outcome out.
//!
//! Each use case unpacks its command and forwards to a domain service, so
//! the HTTP layer never calls services with loose arguments.

mod customer_usecases;
mod user_usecases;

pub use customer_usecases::*;
pub use user_usecases::*;
