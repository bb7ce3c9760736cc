//! In-memory identity store using a Tokio lock, for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use campfire_core::error::AppError;
use campfire_core::result::AppResult;
use campfire_entity::user::{CreateUser, User};

use super::{IdentityStore, check_password};
use crate::password::PasswordHasher;

/// In-memory identity store.
///
/// Uniqueness checks and the insert happen under one write lock, so two
/// racing creates for the same Facebook id cannot both succeed.
#[derive(Debug, Clone)]
pub struct MemoryIdentityStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    hasher: PasswordHasher,
}

impl MemoryIdentityStore {
    /// Creates an empty store.
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            hasher,
        }
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    async fn find_where(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.read().await.values().find(|u| pred(u)).cloned()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let user = self.find_where(|u| u.username == username).await;
        check_password(&self.hasher, user, password).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_facebook_id(&self, facebook_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .find_where(|u| u.facebook_id.as_deref() == Some(facebook_id))
            .await)
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }
        if let Some(facebook_id) = data.facebook_id.as_deref()
            && users
                .values()
                .any(|u| u.facebook_id.as_deref() == Some(facebook_id))
        {
            return Err(AppError::conflict(
                "Facebook account is already linked to a user",
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            facebook_id: data.facebook_id.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            admin: data.admin,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        debug!(user_id = %user.id, username = %user.username, "User stored in memory");

        Ok(user)
    }
}
