//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and token lifetime configuration

pub mod auth;

pub use auth::JwtConfig;
