use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::{AppState, CurrentUser};
use crate::error::AppResult;
use crate::services::ratings::{self, SubmitRating};

#[derive(Debug, Deserialize)]
pub struct RatingQuery {
    pub content_id: Uuid,
}

/// Handler returning the caller's rating for one catalog item
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<RatingQuery>,
) -> AppResult<Json<Value>> {
    let rating = ratings::get_rating(&state.pool, user_id, params.content_id).await?;
    Ok(Json(json!({ "rating": rating })))
}

/// Handler for submitting or updating a rating
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<SubmitRating>,
) -> AppResult<Json<Value>> {
    let rating = ratings::submit_rating(&state.pool, user_id, request).await?;
    Ok(Json(json!({ "success": true, "data": rating })))
}
