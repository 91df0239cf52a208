//! Principal status administration.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use adportal_service::PrincipalStatus;

use crate::dto::request::StatusChangeRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::extractors::path::parse_kind;
use crate::state::AppState;

/// PUT /api/staff/principals/{kind}/{id}/status
pub async fn set_principal_status(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<ApiResponse<PrincipalStatus>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let changed = state
        .principal_service
        .set_status(&auth, kind, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(changed)))
}
