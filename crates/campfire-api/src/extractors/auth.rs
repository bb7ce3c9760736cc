//! `AuthUser` and `AdminUser` extractors: resolve the bearer token to a user
//! before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use campfire_auth::Verification;
use campfire_core::error::AppError;
use campfire_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The user a valid bearer token resolved to.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match state.tokens.verify_bearer(header).await? {
            Verification::Authenticated(user) => Ok(AuthUser(user)),
            // The cause is logged by the token service, never returned.
            Verification::Rejected(_) => Err(AppError::authentication("Unauthorized").into()),
        }
    }
}

/// An authenticated user that also passed the admin gate.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl std::ops::Deref for AdminUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        state.gate.authorize(&user)?;
        Ok(AdminUser(user))
    }
}
