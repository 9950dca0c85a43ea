pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;
pub mod store;

pub use mock::InMemoryPartition;
pub use r#trait::PartitionRepository;
pub use store::IdentityStore;
