use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::{AppState, MaybeUser};
use crate::error::AppResult;
use crate::models::ContentResponse;
use crate::services::discovery;

#[derive(Debug, Serialize)]
pub struct DiscoverResponse {
    pub recommendations: Vec<ContentResponse>,
}

/// Handler for the non-AI discovery list; anonymous callers get the
/// popular fallback
pub async fn recommendations(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> AppResult<Json<DiscoverResponse>> {
    let recommendations = discovery::recommendations(&state.pool, user).await?;
    Ok(Json(DiscoverResponse { recommendations }))
}
