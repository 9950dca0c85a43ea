//! Typed application errors raised at the orchestrator boundary.
//!
//! Every error carries a stable code for structured responses; the
//! conversions at the bottom build the `hv_shared` response shape.

use hv_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Authentication errors
///
/// `InvalidCredentials` deliberately covers both unknown identifiers and
/// wrong passwords so callers cannot probe which emails exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is locked")]
    AccountLocked,

    #[error("Already exists: {field}")]
    AlreadyExists { field: String },

    /// Id resolution after token decode found no live identity
    #[error("Identity not found")]
    IdentityNotFound,
}

/// Token errors raised on the refresh path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors raised before any store write
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Password does not meet the strength policy")]
    WeakPassword,

    #[error("Explicit consent is required")]
    ConsentRequired,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone format")]
    InvalidPhoneFormat,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::AccountLocked => error_codes::ACCOUNT_LOCKED,
            AuthError::AlreadyExists { .. } => error_codes::ALREADY_EXISTS,
            AuthError::IdentityNotFound => error_codes::NOT_FOUND,
        };
        let response = ErrorResponse::new(code, err.to_string());
        match err {
            AuthError::AlreadyExists { field } => response.add_detail("field", field),
            _ => response,
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let code = match &err {
            TokenError::TokenInvalid => error_codes::TOKEN_INVALID,
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::TokenGenerationFailed => error_codes::INTERNAL_ERROR,
        };
        ErrorResponse::new(code, err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let response = ErrorResponse::new(error_codes::VALIDATION_FAILED, err.to_string());
        match err {
            ValidationError::RequiredField { field } => response.add_detail("field", field),
            _ => response,
        }
    }
}

impl From<super::DomainError> for ErrorResponse {
    fn from(err: super::DomainError) -> Self {
        match err {
            super::DomainError::Internal { message } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, message)
            }
            super::DomainError::Auth(e) => e.into(),
            super::DomainError::Token(e) => e.into(),
            super::DomainError::Validation(e) => e.into(),
        }
    }
}
