//! REST API controllers.

pub mod customer_controller;
pub mod health_controller;
pub mod user_controller;

pub use health_controller::*;
