//! # Meridian REST
//!
//! REST API layer using Axum. Exposes user and customer management under
//! `/api/v1`, health probes, and the OpenAPI document with Swagger UI.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
