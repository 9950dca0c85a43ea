//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    AdminProfile, Claims, DoctorProfile, DoctorVerification, Identity, PatientProfile,
    RoleProfile, TokenKind, TokenPair, UserRole, UserStatus, ACCESS_TOKEN_EXPIRY_MINUTES,
    JWT_AUDIENCE, JWT_ISSUER, LOCK_DURATION_MINUTES, MAX_FAILED_LOGIN_ATTEMPTS,
    REFRESH_TOKEN_EXPIRY_DAYS, TOKEN_TYPE_BEARER,
};
pub use value_objects::AuthResult;
