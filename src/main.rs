//! Campfire Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use campfire_api::AppState;
use campfire_auth::{
    FacebookProfileProvider, IdentityStore, MemoryIdentityStore, PasswordHasher, PgIdentityStore,
    ProfileProvider,
};
use campfire_core::config::{AppConfig, StoreProvider};
use campfire_core::error::AppError;
use campfire_database::DatabasePool;
use campfire_database::repositories::{
    MemoryPartnerStore, PartnerRepository, PartnerStore, UserRepository,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CAMPFIRE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Stores selected by `store.provider`
struct Stores {
    identity: Arc<dyn IdentityStore>,
    partners: Arc<dyn PartnerStore>,
    db: Option<DatabasePool>,
}

async fn init_stores(config: &AppConfig, hasher: PasswordHasher) -> Result<Stores, AppError> {
    match config.store.provider {
        StoreProvider::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            Ok(Stores {
                identity: Arc::new(MemoryIdentityStore::new(hasher)),
                partners: Arc::new(MemoryPartnerStore::new()),
                db: None,
            })
        }
        StoreProvider::Postgres => {
            tracing::info!("Connecting to database...");
            let db = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                tracing::info!("Running database migrations...");
                db.migrate().await?;
                tracing::info!("Database migrations complete");
            }

            let users = Arc::new(UserRepository::new(db.pool()));
            Ok(Stores {
                identity: Arc::new(PgIdentityStore::new(users, hasher)),
                partners: Arc::new(PartnerRepository::new(db.pool())),
                db: Some(db),
            })
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Campfire v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_default_secret() {
        tracing::warn!("auth.secret_key is the default placeholder; set CAMPFIRE__AUTH__SECRET_KEY");
    }

    // ── Step 1: Identity and partner stores ──────────────────────
    let stores = init_stores(&config, PasswordHasher::new()).await?;

    // ── Step 2: External identity provider ───────────────────────
    let facebook: Arc<dyn ProfileProvider> =
        Arc::new(FacebookProfileProvider::new(&config.facebook)?);

    // ── Step 3: Application state and router ─────────────────────
    let config = Arc::new(config);
    let state = AppState::new(
        Arc::clone(&config),
        stores.identity,
        facebook,
        stores.partners,
    );
    let app = campfire_api::build_app(state, &config.server.cors);

    // ── Step 4: Bind and serve ───────────────────────────────────
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Campfire server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                tracing::info!("Shutdown signal received, starting graceful shutdown...");
                let _ = shutdown_tx.send(true);
            })
            .await
    });

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let served = tokio::select! {
        result = &mut server => result,
        _ = shutdown_rx.changed() => {
            let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out; dropping open connections");
                    server.abort();
                    Ok(Ok(()))
                }
            }
        }
    };

    served
        .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(db) = stores.db {
        db.close().await;
    }

    tracing::info!("Campfire server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
