//! Auth handlers: local login, Facebook token login, current user.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use tracing::info;

use campfire_core::error::AppError;

use crate::dto::request::{FacebookTokenRequest, LoginRequest, validate};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Header some clients use to pass the Facebook token.
const ACCESS_TOKEN_HEADER: &str = "access_token";

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    validate(&req)?;

    let Some(user) = state.credentials.verify(&req.username, &req.password).await? else {
        return Err(AppError::authentication("Unauthorized").into());
    };

    let issued = state.tokens.issue(&user)?;
    info!(user_id = %user.id, "User logged in");
    Ok(Json(issued.into()))
}

/// GET|POST /users/facebook/token
///
/// The token is read from the `access_token` query parameter, then the JSON
/// body, then an `access_token` header.
pub async fn facebook_token(
    State(state): State<AppState>,
    Query(query): Query<FacebookTokenRequest>,
    headers: HeaderMap,
    body: Option<Json<FacebookTokenRequest>>,
) -> ApiResult<Json<LoginResponse>> {
    let token = query
        .access_token
        .or_else(|| body.and_then(|Json(b)| b.access_token))
        .or_else(|| {
            headers
                .get(ACCESS_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::authentication("Unauthorized"))?;

    let profile = state.profile_provider.fetch_profile(&token).await?;
    let user = state.linker.link(&profile).await?;

    let issued = state.tokens.issue(&user)?;
    info!(
        user_id = %user.id,
        provider = state.profile_provider.name(),
        "User logged in with external provider"
    );
    Ok(Json(issued.into()))
}

/// GET /users/me
pub async fn me(AuthUser(user): AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(user.into()))
}
