//! Repository traits for data persistence.
//!
//! Storage is partitioned by role; each partition exposes the same
//! async trait so the resolver can probe them uniformly.

pub mod identity;

pub use identity::{IdentityStore, InMemoryPartition, PartitionRepository};
