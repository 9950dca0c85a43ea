//! Password hashing and strength checks.

mod service;


pub use service::CredentialService;
