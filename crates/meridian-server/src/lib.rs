//! # Meridian Server Library
//!
//! Dependency injection modules, logging setup and the HTTP server runner
//! for the Meridian binary.

pub mod di;
pub mod logging;
pub mod server;
pub mod startup;
