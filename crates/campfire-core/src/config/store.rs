//! Identity store selection.

use serde::{Deserialize, Serialize};

/// Backend that holds user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local map; single-node development and tests only.
    Memory,
}

/// Identity store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Which backend to use.
    #[serde(default)]
    pub provider: StoreProvider,
}
