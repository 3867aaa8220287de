use axum::{extract::State, Json};

use crate::api::{AppState, CurrentUser};
use crate::error::AppResult;
use crate::services::admin::{self, AdminDashboard};

/// Handler for the admin dashboard snapshot
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
) -> AppResult<Json<AdminDashboard>> {
    let dashboard = admin::dashboard(&state.pool).await?;
    Ok(Json(dashboard))
}
