//! Domain entities representing core business objects.

pub mod identity;
pub mod token;

// Re-export commonly used types
pub use identity::{
    AdminProfile, DoctorProfile, DoctorVerification, Identity, PatientProfile, RoleProfile,
    UserRole, UserStatus, LOCK_DURATION_MINUTES, MAX_FAILED_LOGIN_ATTEMPTS,
};
pub use token::{
    Claims, TokenKind, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_EXPIRY_DAYS, TOKEN_TYPE_BEARER,
};
