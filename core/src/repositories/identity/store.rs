//! Bundles the four role partitions behind a single handle.

use std::sync::Arc;

use crate::domain::entities::identity::UserRole;

use super::mock::InMemoryPartition;
use super::trait_::PartitionRepository;

/// The four role partitions, probed in a fixed order.
///
/// Identifier lookups walk generic, then patient, then doctor, then admin,
/// and stop at the first hit. Registration and id-scoped operations go
/// straight to the partition for the identity's role.
#[derive(Clone)]
pub struct IdentityStore {
    generic: Arc<dyn PartitionRepository>,
    patient: Arc<dyn PartitionRepository>,
    doctor: Arc<dyn PartitionRepository>,
    admin: Arc<dyn PartitionRepository>,
}

impl IdentityStore {
    pub fn new(
        generic: Arc<dyn PartitionRepository>,
        patient: Arc<dyn PartitionRepository>,
        doctor: Arc<dyn PartitionRepository>,
        admin: Arc<dyn PartitionRepository>,
    ) -> Self {
        Self {
            generic,
            patient,
            doctor,
            admin,
        }
    }

    /// Store backed by in-memory partitions.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryPartition::new(UserRole::Generic)),
            Arc::new(InMemoryPartition::new(UserRole::Patient)),
            Arc::new(InMemoryPartition::new(UserRole::Doctor)),
            Arc::new(InMemoryPartition::new(UserRole::Admin)),
        )
    }

    /// The partition that stores the given role.
    pub fn partition(&self, role: UserRole) -> &Arc<dyn PartitionRepository> {
        match role {
            UserRole::Generic => &self.generic,
            UserRole::Patient => &self.patient,
            UserRole::Doctor => &self.doctor,
            UserRole::Admin => &self.admin,
        }
    }

    /// All partitions in probe order.
    pub fn partitions(&self) -> [&Arc<dyn PartitionRepository>; 4] {
        [&self.generic, &self.patient, &self.doctor, &self.admin]
    }
}
