//! Customer tree handlers: the organization's connected ad accounts.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use adportal_entity::ad_account::ConnectedAdAccount;
use adportal_service::ConnectAdAccountRequest;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// GET /api/customer/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> Result<Json<ApiResponse<Vec<ConnectedAdAccount>>>, ApiError> {
    let accounts = state.ad_account_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(accounts)))
}

/// POST /api/customer/accounts
pub async fn connect_account(
    State(state): State<AppState>,
    auth: AuthPrincipal,
    Json(req): Json<ConnectAdAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ConnectedAdAccount>>), ApiError> {
    let account = state.ad_account_service.connect(&auth, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account))))
}
