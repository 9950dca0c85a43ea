//! In-memory implementation of `PartitionRepository` for testing and
//! local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::identity::{Identity, UserRole};
use crate::errors::{AuthError, DomainError};

use super::trait_::PartitionRepository;

/// One role partition backed by a hash map.
///
/// The atomic read-modify-write methods hold the write lock for the whole
/// mutation, so concurrent counter bumps never lose updates. A backing
/// store would use a single findAndModify-style statement instead.
pub struct InMemoryPartition {
    role: UserRole,
    identities: Arc<RwLock<HashMap<Uuid, Identity>>>,
}

impl InMemoryPartition {
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            identities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn live<'a>(identity: &'a Identity) -> Option<&'a Identity> {
        if identity.deleted {
            None
        } else {
            Some(identity)
        }
    }

    fn not_found() -> DomainError {
        AuthError::IdentityNotFound.into()
    }
}

#[async_trait]
impl PartitionRepository for InMemoryPartition {
    fn role(&self) -> UserRole {
        self.role
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .filter_map(Self::live)
            .find(|i| i.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .filter_map(Self::live)
            .find(|i| i.phone == phone)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities.get(&id).and_then(Self::live).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_phone(phone).await?.is_some())
    }

    async fn exists_by_role_key(&self, field: &str, value: &str) -> Result<bool, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities.values().filter_map(Self::live).any(|i| {
            i.profile
                .unique_keys()
                .iter()
                .any(|(f, v)| *f == field && *v == value)
        }))
    }

    async fn create(&self, identity: Identity) -> Result<Identity, DomainError> {
        if identity.role() != self.role {
            return Err(DomainError::Internal {
                message: format!(
                    "partition {:?} cannot store role {:?}",
                    self.role,
                    identity.role()
                ),
            });
        }

        let mut identities = self.identities.write().await;

        // Last-resort uniqueness backstop; the validator checks first.
        if identities
            .values()
            .filter(|i| !i.deleted)
            .any(|i| i.email.eq_ignore_ascii_case(&identity.email))
        {
            return Err(AuthError::AlreadyExists {
                field: "email".to_string(),
            }
            .into());
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn update(&self, identity: Identity) -> Result<Identity, DomainError> {
        let mut identities = self.identities.write().await;

        if !identities.contains_key(&identity.id) {
            return Err(Self::not_found());
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn increment_failed_login(&self, id: Uuid) -> Result<Identity, DomainError> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(&id)
            .filter(|i| !i.deleted)
            .ok_or_else(Self::not_found)?;
        identity.record_failed_attempt();
        Ok(identity.clone())
    }

    async fn record_login_success(&self, id: Uuid) -> Result<Identity, DomainError> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(&id)
            .filter(|i| !i.deleted)
            .ok_or_else(Self::not_found)?;
        identity.record_success();
        Ok(identity.clone())
    }

    async fn clear_lock(&self, id: Uuid) -> Result<Identity, DomainError> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(&id)
            .filter(|i| !i.deleted)
            .ok_or_else(Self::not_found)?;
        identity.clear_lock();
        Ok(identity.clone())
    }

    async fn find_locked(&self) -> Result<Vec<Identity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .filter_map(Self::live)
            .filter(|i| i.lock_until.is_some())
            .cloned()
            .collect())
    }

    async fn mark_deleted(&self, id: Uuid, deleted_by: Uuid) -> Result<bool, DomainError> {
        let mut identities = self.identities.write().await;
        match identities.get_mut(&id).filter(|i| !i.deleted) {
            Some(identity) => {
                identity.mark_deleted(deleted_by);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut identities = self.identities.write().await;
        Ok(identities.remove(&id).is_some())
    }
}
