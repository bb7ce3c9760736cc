//! Username/password verification.

use std::sync::Arc;

use tracing::{info, warn};

use campfire_core::result::AppResult;
use campfire_entity::user::User;

use crate::store::IdentityStore;

/// Checks presented credentials against the identity store.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn IdentityStore>,
}

impl CredentialVerifier {
    /// Creates a verifier over the given store.
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Returns the matching user, or `None` when the credentials are wrong.
    ///
    /// Store failures propagate as `Err` so callers can tell "no access"
    /// apart from "could not determine access".
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let user = self.store.authenticate(username, password).await?;
        match &user {
            Some(user) => info!(user_id = %user.id, username = %username, "Credentials accepted"),
            None => warn!(username = %username, "Credentials rejected"),
        }
        Ok(user)
    }
}
