//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use campfire_auth::{
    AuthorizationGate, CredentialVerifier, ExternalIdentityLinker, IdentityStore, ProfileProvider,
    TokenService,
};
use campfire_core::config::AppConfig;
use campfire_database::repositories::PartnerStore;

/// Application state containing all shared dependencies.
///
/// Built once at startup and passed to every handler via `State<AppState>`.
/// Every field is cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Username/password check
    pub credentials: CredentialVerifier,
    /// Session token issue and verify
    pub tokens: TokenService,
    /// Facebook identity lookup
    pub profile_provider: Arc<dyn ProfileProvider>,
    /// Facebook identity to local user resolution
    pub linker: ExternalIdentityLinker,
    /// Admin check
    pub gate: AuthorizationGate,

    // ── Data ─────────────────────────────────────────────────
    /// Partner storage
    pub partners: Arc<dyn PartnerStore>,
}

impl AppState {
    /// Wires the authentication core around the given stores.
    pub fn new(
        config: Arc<AppConfig>,
        identity_store: Arc<dyn IdentityStore>,
        profile_provider: Arc<dyn ProfileProvider>,
        partners: Arc<dyn PartnerStore>,
    ) -> Self {
        Self {
            credentials: CredentialVerifier::new(Arc::clone(&identity_store)),
            tokens: TokenService::new(&config.auth, Arc::clone(&identity_store)),
            linker: ExternalIdentityLinker::new(identity_store),
            profile_provider,
            gate: AuthorizationGate::new(),
            partners,
            config,
        }
    }
}
