//! Links provider identities to local users, provisioning on first login.

use std::sync::Arc;

use tracing::{info, warn};

use campfire_core::result::AppResult;
use campfire_entity::user::{CreateUser, User};

use super::profile::ProviderProfile;
use crate::store::IdentityStore;

/// Resolves or provisions the local user for a Facebook identity.
#[derive(Debug, Clone)]
pub struct ExternalIdentityLinker {
    store: Arc<dyn IdentityStore>,
}

impl ExternalIdentityLinker {
    /// Creates a linker over the given store.
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Returns the user linked to `profile.external_id`, creating it if absent.
    ///
    /// An existing user is returned exactly as stored; a changed provider
    /// profile never overwrites it. Store failures are hard errors.
    pub async fn link(&self, profile: &ProviderProfile) -> AppResult<User> {
        if let Some(user) = self.store.find_by_facebook_id(&profile.external_id).await? {
            info!(user_id = %user.id, facebook_id = %profile.external_id, "Linked Facebook login to existing user");
            return Ok(user);
        }

        let (first_name, last_name) = profile.names();
        let data = CreateUser {
            username: profile.display_name.clone(),
            password_hash: None,
            facebook_id: Some(profile.external_id.clone()),
            first_name,
            last_name,
            admin: false,
        };

        match self.store.create(&data).await {
            Ok(user) => {
                info!(user_id = %user.id, facebook_id = %profile.external_id, "Provisioned user from Facebook profile");
                Ok(user)
            }
            // A concurrent first login may have inserted the same external id.
            Err(err) if err.is_conflict() => {
                match self.store.find_by_facebook_id(&profile.external_id).await? {
                    Some(user) => {
                        warn!(user_id = %user.id, facebook_id = %profile.external_id, "Lost provisioning race; using existing user");
                        Ok(user)
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}
