//! Store doubles shared by unit tests.

use async_trait::async_trait;
use uuid::Uuid;

use campfire_core::error::AppError;
use campfire_core::result::AppResult;
use campfire_entity::user::{CreateUser, User};

use super::IdentityStore;

/// A store whose every call fails as if the database were down.
#[derive(Debug)]
pub(crate) struct UnavailableStore;

fn down() -> AppError {
    AppError::database("connection refused")
}

#[async_trait]
impl IdentityStore for UnavailableStore {
    async fn authenticate(&self, _: &str, _: &str) -> AppResult<Option<User>> {
        Err(down())
    }

    async fn find_by_id(&self, _: Uuid) -> AppResult<Option<User>> {
        Err(down())
    }

    async fn find_by_facebook_id(&self, _: &str) -> AppResult<Option<User>> {
        Err(down())
    }

    async fn create(&self, _: &CreateUser) -> AppResult<User> {
        Err(down())
    }
}
