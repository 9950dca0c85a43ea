//! Token service module for JWT management
//!
//! Stateless HS256 tokens: access tokens carry the identity's role and
//! email, refresh tokens only the identity id. Nothing is persisted;
//! validity comes entirely from the signature and the registered claims.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
