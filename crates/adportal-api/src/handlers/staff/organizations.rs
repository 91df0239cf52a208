//! Organization administration: provisioning, lookup, status, deletion.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use adportal_entity::organization::Organization;
use adportal_service::{
    ProvisionOrganizationRequest, ProvisionedOrganization, UpdateOrganizationRequest,
};

use crate::dto::request::StatusChangeRequest;
use crate::dto::response::{ApiResponse, MessageResponse, OrganizationDetail};
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// GET /api/staff/organizations
pub async fn list_organizations(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> Result<Json<ApiResponse<Vec<Organization>>>, ApiError> {
    let organizations = state.organization_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(organizations)))
}

/// POST /api/staff/organizations
pub async fn provision_organization(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Json(req): Json<ProvisionOrganizationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProvisionedOrganization>>), ApiError> {
    let created = state.organization_service.provision(&auth, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// GET /api/staff/organizations/{id}
pub async fn get_organization(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrganizationDetail>>, ApiError> {
    let organization = state.organization_service.get(&auth, id).await?;
    let members = state.organization_service.members(&auth, id).await?;
    Ok(Json(ApiResponse::ok(OrganizationDetail {
        organization,
        members,
    })))
}

/// PUT /api/staff/organizations/{id}
pub async fn update_organization(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<ApiResponse<Organization>>, ApiError> {
    let organization = state.organization_service.update(&auth, id, &req).await?;
    Ok(Json(ApiResponse::ok(organization)))
}

/// PUT /api/staff/organizations/{id}/status
pub async fn set_organization_status(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<ApiResponse<Organization>>, ApiError> {
    let organization = state
        .organization_service
        .set_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(organization)))
}

/// DELETE /api/staff/organizations/{id}
pub async fn delete_organization(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.organization_service.soft_delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Organization deleted",
    ))))
}
