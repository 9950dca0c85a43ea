//! Partition repository trait defining the interface for identity persistence.
//!
//! Storage is split into four role partitions (generic, patient, doctor,
//! admin). Every partition exposes the same async contract so the resolver
//! and the auth service can treat them uniformly. All lookup methods exclude
//! soft-deleted identities; only `delete` touches tombstoned rows.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, UserRole};
use crate::errors::DomainError;

/// Repository contract for one role partition.
///
/// Implementations handle the actual storage operations while keeping the
/// abstraction boundary between domain and infrastructure layers. The
/// read-modify-write methods (`increment_failed_login`,
/// `record_login_success`, `clear_lock`) must be atomic per identity:
/// concurrent calls may not lose updates.
#[async_trait]
pub trait PartitionRepository: Send + Sync {
    /// Which role this partition stores.
    fn role(&self) -> UserRole;

    /// Find a live identity by normalized email.
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - identity found and not soft-deleted
    /// * `Ok(None)` - no match in this partition
    /// * `Err(DomainError)` - storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError>;

    /// Find a live identity by normalized phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Identity>, DomainError>;

    /// Find a live identity by its unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, DomainError>;

    /// Check whether a live identity with this email exists.
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check whether a live identity with this phone exists.
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError>;

    /// Check whether a live identity carries the given role-specific key,
    /// e.g. `("license_no", "MD-12345")` for the doctor partition.
    async fn exists_by_role_key(&self, field: &str, value: &str) -> Result<bool, DomainError>;

    /// Persist a new identity.
    ///
    /// # Returns
    /// * `Ok(Identity)` - the created identity
    /// * `Err(DomainError)` - creation failed, e.g. the identity's role does
    ///   not match this partition or a unique key collided
    async fn create(&self, identity: Identity) -> Result<Identity, DomainError>;

    /// Replace an existing identity with updated fields.
    async fn update(&self, identity: Identity) -> Result<Identity, DomainError>;

    /// Atomically bump the failed-login counter, locking the account when
    /// the threshold is crossed. Returns the identity after the update.
    async fn increment_failed_login(&self, id: Uuid) -> Result<Identity, DomainError>;

    /// Atomically reset the failed-login counter, clear any lock and stamp
    /// the last-login time.
    async fn record_login_success(&self, id: Uuid) -> Result<Identity, DomainError>;

    /// Atomically clear the lock and counter without touching last-login.
    async fn clear_lock(&self, id: Uuid) -> Result<Identity, DomainError>;

    /// List live identities whose lock window has not yet been cleared,
    /// expired or not. Used by the lock sweep.
    async fn find_locked(&self) -> Result<Vec<Identity>, DomainError>;

    /// Soft-delete: tombstone the identity and record who removed it.
    ///
    /// # Returns
    /// * `Ok(true)` - identity was tombstoned
    /// * `Ok(false)` - no live identity with that id
    async fn mark_deleted(&self, id: Uuid, deleted_by: Uuid) -> Result<bool, DomainError>;

    /// Physically remove a row, tombstoned or not.
    ///
    /// # Returns
    /// * `Ok(true)` - row removed
    /// * `Ok(false)` - id unknown
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
