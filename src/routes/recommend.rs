use axum::{extract::State, Json};

use crate::api::{AppState, CurrentUser};
use crate::error::AppResult;
use crate::services::recommendation::RecommendationOutcome;

/// Handler for the AI recommendation pipeline
///
/// Requires an authenticated caller; the extractor rejects anonymous
/// requests before the pipeline runs.
pub async fn recommend(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<RecommendationOutcome>> {
    let outcome = state.pipeline.run(user_id).await?;
    Ok(Json(outcome))
}
