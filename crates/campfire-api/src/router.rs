//! Route definitions for the Campfire HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Guards are expressed as extractors on each handler.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, without cross-cutting layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(partner_routes())
        .with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Login and current user
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/login", post(handlers::auth::login))
        .route(
            "/users/facebook/token",
            get(handlers::auth::facebook_token).post(handlers::auth::facebook_token),
        )
        .route("/users/me", get(handlers::auth::me))
}

/// Partner CRUD
fn partner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/partners",
            get(handlers::partner::list_partners).post(handlers::partner::create_partner),
        )
        .route(
            "/partners/{id}",
            get(handlers::partner::get_partner)
                .put(handlers::partner::update_partner)
                .delete(handlers::partner::delete_partner),
        )
}
