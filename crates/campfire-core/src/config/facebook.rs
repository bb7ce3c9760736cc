//! Facebook OAuth provider configuration.

use serde::{Deserialize, Serialize};

/// Credentials and endpoint for the Facebook Graph API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacebookConfig {
    /// Application (client) id issued by Facebook.
    #[serde(default)]
    pub client_id: String,
    /// Application secret issued by Facebook.
    #[serde(default)]
    pub client_secret: String,
    /// Graph API base URL, including the API version.
    #[serde(default = "default_graph_url")]
    pub graph_url: String,
    /// Timeout for a single profile request in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            graph_url: default_graph_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_graph_url() -> String {
    "https://graph.facebook.com/v3.2".to_string()
}

fn default_timeout() -> u64 {
    10
}
