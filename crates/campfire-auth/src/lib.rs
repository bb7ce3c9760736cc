//! # campfire-auth
//!
//! Authentication and authorization core for Campfire.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `store`: the identity store seam, with Postgres and in-memory backends
//! - `credential`: username/password verification
//! - `jwt`: session token issuance and verification
//! - `oauth`: Facebook profile lookup and external identity linking
//! - `gate`: admin authorization check

pub mod credential;
pub mod gate;
pub mod jwt;
pub mod oauth;
pub mod password;
pub mod store;

pub use credential::CredentialVerifier;
pub use gate::{AuthorizationGate, NOT_AUTHORIZED_MESSAGE};
pub use jwt::{IssuedToken, Rejection, SessionClaims, TokenService, Verification};
pub use oauth::{ExternalIdentityLinker, FacebookProfileProvider, ProfileProvider, ProviderProfile};
pub use password::PasswordHasher;
pub use store::{IdentityStore, MemoryIdentityStore, PgIdentityStore};
