//! Authentication service module
//!
//! This module provides the identity and authentication core:
//! - Role-partitioned registration (patient, doctor, admin, generic)
//! - Login with identifier resolution across partitions
//! - Brute-force lockout and the expired-lock sweep
//! - Stateless token refresh
//! - Password change and account removal

mod account_lock;
mod registration;
mod resolver;
mod service;

#[cfg(test)]
mod tests;

pub use account_lock::{AccountLockInfo, AccountLockService};
pub use registration::{
    RegisterAdminRequest, RegisterDoctorRequest, RegisterPatientRequest, RegisterRequest,
    RegistrationValidator,
};
pub use resolver::IdentityResolver;
pub use service::AuthService;
