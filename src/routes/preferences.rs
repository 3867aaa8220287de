use axum::{extract::State, Json};

use crate::api::{AppState, CurrentUser};
use crate::error::AppResult;
use crate::models::UserPreferences;
use crate::services::preferences;

/// Handler returning the caller's preferences
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<UserPreferences>> {
    let prefs = preferences::get(&state.pool, user_id).await?;
    Ok(Json(prefs))
}

/// Handler replacing the caller's preferences
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<UserPreferences>,
) -> AppResult<Json<UserPreferences>> {
    let prefs = preferences::update(&state.pool, user_id, request).await?;
    Ok(Json(prefs))
}
