//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user known to the identity store.
///
/// Records are created by registration or lazily on first Facebook login.
/// The authentication core reads them but never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Opaque identifier, immutable once assigned.
    pub id: Uuid,
    /// Unique login / display name.
    pub username: String,
    /// Argon2 password hash. `None` for accounts provisioned through Facebook.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Facebook subject identifier, unique when present.
    #[serde(default)]
    pub facebook_id: Option<String>,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Privilege flag; grants administrative operations.
    #[serde(default)]
    pub admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password, if the account signs in locally.
    pub password_hash: Option<String>,
    /// Facebook subject identifier for provider-linked accounts.
    pub facebook_id: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Privilege flag.
    pub admin: bool,
}
