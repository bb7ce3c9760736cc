//! The identity store seam.
//!
//! Everything the authentication core knows about persisted users goes
//! through [`IdentityStore`]. Two backends ship with the crate: Postgres
//! (production) and an in-process map (single-node development and tests).

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use uuid::Uuid;

use campfire_core::result::AppResult;
use campfire_entity::user::{CreateUser, User};

use crate::password::PasswordHasher;

pub use memory::MemoryIdentityStore;
pub use postgres::PgIdentityStore;

/// Persistence and credential-check routine for user records.
///
/// `Ok(None)` is a miss; `Err` always means the store could not answer.
#[async_trait]
pub trait IdentityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` for an unknown username, a wrong password, or an
    /// account that has no password.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>>;

    /// Find a user by opaque identifier.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by linked Facebook identifier.
    async fn find_by_facebook_id(&self, facebook_id: &str) -> AppResult<Option<User>>;

    /// Persist a new user. Duplicate `username` or `facebook_id` is a
    /// [`Conflict`](campfire_core::error::ErrorKind::Conflict).
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

/// Hash `password` and create a local account.
pub async fn register_local_user(
    store: &dyn IdentityStore,
    hasher: &PasswordHasher,
    username: &str,
    password: &str,
    admin: bool,
) -> AppResult<User> {
    let password_hash = hasher.hash_password(password)?;
    store
        .create(&CreateUser {
            username: username.to_string(),
            password_hash: Some(password_hash),
            admin,
            ..Default::default()
        })
        .await
}

/// Shared credential check used by every backend once the row is loaded.
pub(crate) async fn check_password(
    hasher: &PasswordHasher,
    user: Option<User>,
    password: &str,
) -> AppResult<Option<User>> {
    let Some(user) = user else {
        return Ok(None);
    };
    let Some(hash) = user.password_hash.clone() else {
        return Ok(None);
    };
    let matches = hasher
        .verify_password_blocking(password.to_string(), hash)
        .await?;
    Ok(matches.then_some(user))
}
