//! External identity: provider profile lookup and local account linking.

pub mod facebook;
pub mod linker;
pub mod profile;

pub use facebook::FacebookProfileProvider;
pub use linker::ExternalIdentityLinker;
pub use profile::{ProfileProvider, ProviderProfile};
