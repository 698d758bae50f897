//! # Meridian Core
//!
//! Core types, traits, and error definitions shared by every layer of the
//! Meridian user and customer service.

pub mod clock;
pub mod error;
pub mod id;
pub mod pagination;
pub mod patch;
pub mod result;
pub mod traits;
pub mod validation;

pub use clock::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use patch::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
