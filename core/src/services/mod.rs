//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credential;
pub mod token;

// Re-export commonly used types
pub use auth::{
    AccountLockInfo, AccountLockService, AuthService, IdentityResolver, RegisterAdminRequest,
    RegisterDoctorRequest, RegisterPatientRequest, RegisterRequest, RegistrationValidator,
};
pub use credential::CredentialService;
pub use token::{TokenService, TokenServiceConfig};
