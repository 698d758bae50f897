//! # Meridian Security
//!
//! One-way credential hashing for user passwords.

pub mod password;

pub use password::*;
