//! Postgres-backed identity store.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use campfire_core::result::AppResult;
use campfire_database::repositories::UserRepository;
use campfire_entity::user::{CreateUser, User};

use super::{IdentityStore, check_password};
use crate::password::PasswordHasher;

/// Identity store over the `users` table.
///
/// Uniqueness of `username` and `facebook_id` is enforced by the table's
/// constraints, which also settles concurrent first logins.
#[derive(Debug, Clone)]
pub struct PgIdentityStore {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
}

impl PgIdentityStore {
    /// Creates a store over the given repository.
    pub fn new(users: Arc<UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let user = self.users.find_by_username(username).await?;
        check_password(&self.hasher, user, password).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_by_facebook_id(&self, facebook_id: &str) -> AppResult<Option<User>> {
        self.users.find_by_facebook_id(facebook_id).await
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        self.users.create(data).await
    }
}
