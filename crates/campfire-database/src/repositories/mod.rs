//! Repository implementations for Campfire entities.

pub mod memory;
pub mod partner;
pub mod user;

pub use memory::MemoryPartnerStore;
pub use partner::{PartnerRepository, PartnerStore};
pub use user::UserRepository;
