//! # campfire-api
//!
//! HTTP API layer for Campfire built on Axum.
//!
//! Provides the REST endpoints, the bearer-token and admin extractors,
//! middleware (CORS, request logging), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
