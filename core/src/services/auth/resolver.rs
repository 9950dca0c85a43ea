//! Identifier resolution across the role partitions.

use uuid::Uuid;

use hv_shared::utils::phone::normalize_phone_number;

use crate::domain::entities::identity::Identity;
use crate::errors::DomainResult;
use crate::repositories::IdentityStore;

/// Resolves a login identifier (email or phone) to at most one identity.
///
/// Partitions are probed in a fixed order (generic, patient, doctor,
/// admin) and resolution stops at the first hit, so a duplicate slipping
/// past registration shadows later partitions deterministically instead
/// of flapping between them. Soft-deleted identities never resolve.
#[derive(Clone)]
pub struct IdentityResolver {
    store: IdentityStore,
}

impl IdentityResolver {
    pub fn new(store: IdentityStore) -> Self {
        Self { store }
    }

    /// Email lookup first across all partitions, then phone lookup.
    pub async fn resolve(&self, identifier: &str) -> DomainResult<Option<Identity>> {
        let email = identifier.trim().to_lowercase();
        for partition in self.store.partitions() {
            if let Some(identity) = partition.find_by_email(&email).await? {
                return Ok(Some(identity));
            }
        }

        let phone = normalize_phone_number(identifier);
        if phone.is_empty() {
            return Ok(None);
        }
        for partition in self.store.partitions() {
            if let Some(identity) = partition.find_by_phone(&phone).await? {
                return Ok(Some(identity));
            }
        }

        Ok(None)
    }

    /// Id lookup in probe order, e.g. from a refresh token subject.
    pub async fn resolve_by_id(&self, id: Uuid) -> DomainResult<Option<Identity>> {
        for partition in self.store.partitions() {
            if let Some(identity) = partition.find_by_id(id).await? {
                return Ok(Some(identity));
            }
        }
        Ok(None)
    }
}
