//! Account lock service for brute force protection.
//!
//! Lock state lives on the identity row itself (counter plus window end),
//! so expiry is passive: a lock stops biting the moment the window passes,
//! whether or not anything has cleared it yet. The sweep exists to tidy
//! stale rows, not to unlock anyone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::entities::identity::{Identity, MAX_FAILED_LOGIN_ATTEMPTS};
use crate::errors::DomainResult;
use crate::repositories::IdentityStore;

/// Account lock information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLockInfo {
    /// Whether the account is currently locked
    pub is_locked: bool,
    /// When the lock window ends, if one is recorded
    pub unlock_at: Option<DateTime<Utc>>,
    /// Consecutive failed attempts so far
    pub failed_attempts: u32,
    /// Attempts left before the account locks
    pub remaining_attempts: u32,
    /// Remaining seconds until unlock
    pub remaining_seconds: Option<i64>,
}

/// Manages lockout state across the role partitions.
pub struct AccountLockService {
    store: IdentityStore,
}

impl AccountLockService {
    pub fn new(store: IdentityStore) -> Self {
        Self { store }
    }

    /// Snapshot of the identity's lock state.
    pub fn lock_info(&self, identity: &Identity) -> AccountLockInfo {
        let is_locked = identity.is_account_locked();
        let remaining_seconds = if is_locked {
            identity
                .lock_until
                .map(|until| (until - Utc::now()).num_seconds().max(0))
        } else {
            None
        };
        AccountLockInfo {
            is_locked,
            unlock_at: identity.lock_until,
            failed_attempts: identity.failed_login_count,
            remaining_attempts: MAX_FAILED_LOGIN_ATTEMPTS
                .saturating_sub(identity.failed_login_count),
            remaining_seconds,
        }
    }

    /// Clears the lock and counter immediately (support-driven unlock).
    pub async fn unlock(&self, identity: &Identity) -> DomainResult<Identity> {
        let updated = self
            .store
            .partition(identity.role())
            .clear_lock(identity.id)
            .await?;
        info!(identity_id = %identity.id, "Account unlocked");
        Ok(updated)
    }

    /// Clears lock state on every identity whose window has already passed.
    ///
    /// Idempotent: a second sweep over the same data clears nothing.
    /// Identities still inside their window are left untouched.
    pub async fn cleanup_expired_locks(&self) -> DomainResult<u64> {
        let now = Utc::now();
        let mut cleared = 0u64;
        for partition in self.store.partitions() {
            for identity in partition.find_locked().await? {
                match identity.lock_until {
                    Some(until) if until <= now => {
                        partition.clear_lock(identity.id).await?;
                        cleared += 1;
                    }
                    _ => {}
                }
            }
        }
        if cleared > 0 {
            info!(cleared, "Expired account locks cleared");
        }
        Ok(cleared)
    }
}
