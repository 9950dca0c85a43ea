//! Authentication result value object returned by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, UserRole, UserStatus};
use crate::domain::entities::token::TokenPair;

/// Successful authentication response: the token pair plus a snapshot of the
/// identity it was issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub access_token: String,
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub last_login_date: Option<DateTime<Utc>>,
}

impl AuthResult {
    /// Builds the response from an identity and a freshly issued token pair
    pub fn from_identity(identity: &Identity, pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            id: identity.id,
            email: identity.email.clone(),
            name: identity.full_name(),
            role: identity.role(),
            status: identity.status,
            email_verified: identity.email_verified,
            phone_verified: identity.phone_verified,
            last_login_date: identity.last_login_at,
        }
    }
}
