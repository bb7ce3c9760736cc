//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session-token signing configuration.
///
/// The key is read once at startup and never rotated while the process runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for HMAC-SHA256 token signing.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing key is still the shipped placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == default_secret_key()
    }
}

fn default_secret_key() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}
