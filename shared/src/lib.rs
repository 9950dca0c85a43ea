//! Shared utilities and common types for the HealthVia server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (phone validation, password strength, etc.)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::JwtConfig;
pub use errors::{error_codes, ErrorResponse};
pub use utils::{password, phone, validation};
