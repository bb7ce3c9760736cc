//! Partner handlers. Reads are public; writes require an admin.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;

use campfire_core::error::AppError;
use campfire_entity::partner::{Partner, UpdatePartner};

use crate::dto::request::{CreatePartnerRequest, UpdatePartnerRequest, validate};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

fn partner_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Partner {id} not found"))
}

/// GET /partners
pub async fn list_partners(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Partner>>>> {
    let partners = state.partners.find_all().await?;
    Ok(Json(ApiResponse::ok(partners)))
}

/// GET /partners/{id}
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Partner>>> {
    let partner = state
        .partners
        .find_by_id(id)
        .await?
        .ok_or_else(|| partner_not_found(id))?;
    Ok(Json(ApiResponse::ok(partner)))
}

/// POST /partners
pub async fn create_partner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreatePartnerRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Partner>>)> {
    validate(&req)?;
    let partner = state.partners.create(&req.into()).await?;
    info!(partner_id = %partner.id, admin_id = %admin.id, "Partner created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(partner))))
}

/// PUT /partners/{id}
pub async fn update_partner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePartnerRequest>,
) -> ApiResult<Json<ApiResponse<Partner>>> {
    validate(&req)?;
    let update = UpdatePartner::from(req);
    if update.is_empty() {
        return Err(AppError::validation("No fields to update").into());
    }

    let partner = state
        .partners
        .update(id, &update)
        .await?
        .ok_or_else(|| partner_not_found(id))?;
    info!(partner_id = %id, admin_id = %admin.id, "Partner updated");
    Ok(Json(ApiResponse::ok(partner)))
}

/// DELETE /partners/{id}
pub async fn delete_partner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    if !state.partners.delete(id).await? {
        return Err(partner_not_found(id).into());
    }
    info!(partner_id = %id, admin_id = %admin.id, "Partner deleted");
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Partner deleted".to_string(),
    })))
}
