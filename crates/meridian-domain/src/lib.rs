//! # Meridian Domain
//!
//! Entities and value objects for users and customers. Entities are plain
//! data plus lifecycle methods; every mutating method takes the instant it
//! happens at and writes it to `updated_at`.

pub mod entities;
pub mod inputs;
pub mod value_objects;

pub use entities::*;
pub use inputs::*;
pub use value_objects::*;
