//! Settings API Handlers

use axum::extract::State;
use shared::models::SettingsSnapshot;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/settings
pub async fn get_snapshot(State(state): State<ServerState>) -> ApiResponse<SettingsSnapshot> {
    let snapshot = state.settings.snapshot();
    ApiResponse::success_with_message("Settings retrieved", (*snapshot).clone())
}

/// POST /api/settings/refresh
pub async fn refresh(State(state): State<ServerState>) -> AppResult<ApiResponse<SettingsSnapshot>> {
    let snapshot = state.settings.refresh().await?;
    Ok(ApiResponse::success_with_message("Settings refreshed", (*snapshot).clone()))
}
