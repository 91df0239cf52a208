//! Sub-customer tree handlers.

use axum::Json;
use axum::extract::State;

use adportal_entity::ad_account::ConnectedAdAccount;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// GET /api/subcustomer/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> Result<Json<ApiResponse<Vec<ConnectedAdAccount>>>, ApiError> {
    let accounts = state.ad_account_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(accounts)))
}
