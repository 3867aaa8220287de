use axum::{extract::State, Json};
use serde_json::Value;

use crate::api::{AppState, CurrentUser};
use crate::error::AppResult;
use crate::services::insights::{AnalyticsRequest, SearchRequest};

/// Handler proxying search to the external microservice
pub async fn search(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<Value>> {
    let results = state.insights.search(user_id, request).await?;
    Ok(Json(results))
}

/// Handler proxying analytics to the external microservice
pub async fn analytics(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<AnalyticsRequest>,
) -> AppResult<Json<Value>> {
    let analytics = state.insights.analytics(user_id, request).await?;
    Ok(Json(analytics))
}
