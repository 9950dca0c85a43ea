//! # HealthVia Core
//!
//! Core business logic and domain layer for the HealthVia backend.
//! This crate contains the identity entities, authentication services,
//! repository interfaces, and error types that form the identity and
//! authentication core of the platform.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
