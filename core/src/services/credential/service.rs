//! Credential service built on bcrypt.

use bcrypt::{hash, verify, DEFAULT_COST};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use hv_shared::utils::password;

use crate::domain::entities::identity::Identity;
use crate::errors::{DomainError, DomainResult, ValidationError};

const TEMP_PASSWORD_LENGTH: usize = 12;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"@#$%^&+=";

/// Hashes and verifies passwords.
///
/// The cost is configurable so tests can run at the minimum bcrypt cost
/// instead of the production default.
#[derive(Debug, Clone)]
pub struct CredentialService {
    cost: u32,
}

impl CredentialService {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Checks the strength policy, then hashes.
    pub fn hash_password(&self, plain: &str) -> DomainResult<String> {
        self.ensure_strong(plain)?;
        hash(plain, self.cost).map_err(|e| {
            warn!(error = %e, "bcrypt hashing failed");
            DomainError::Internal {
                message: "password hashing failed".to_string(),
            }
        })
    }

    /// Hashes the new password onto the identity; the caller persists it.
    pub fn set_password(&self, identity: &mut Identity, plain: &str) -> DomainResult<()> {
        identity.password_hash = self.hash_password(plain)?;
        Ok(())
    }

    /// Constant-result verify; a malformed stored hash reads as a mismatch.
    pub fn verify_password(&self, plain: &str, hashed: &str) -> bool {
        verify(plain, hashed).unwrap_or(false)
    }

    pub fn ensure_strong(&self, plain: &str) -> DomainResult<()> {
        if password::is_strong(plain) {
            Ok(())
        } else {
            Err(ValidationError::WeakPassword.into())
        }
    }

    /// Random password that satisfies the strength policy, for admin-driven
    /// resets. Ambiguous glyphs (O/0, l/1) are left out of the alphabets.
    pub fn generate_temporary_password(&self) -> String {
        let mut rng = rand::thread_rng();
        let mut chars: Vec<u8> = vec![
            *UPPER.choose(&mut rng).unwrap_or(&b'A'),
            *LOWER.choose(&mut rng).unwrap_or(&b'a'),
            *DIGITS.choose(&mut rng).unwrap_or(&b'2'),
            *SYMBOLS.choose(&mut rng).unwrap_or(&b'@'),
        ];
        let all: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();
        while chars.len() < TEMP_PASSWORD_LENGTH {
            chars.push(all[rng.gen_range(0..all.len())]);
        }
        chars.shuffle(&mut rng);
        String::from_utf8(chars).unwrap_or_else(|_| "Temp@Pass234".to_string())
    }
}

impl Default for CredentialService {
    fn default() -> Self {
        Self::new()
    }
}
