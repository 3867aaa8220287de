use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::{AppState, CurrentUser};
use crate::error::AppResult;
use crate::models::WatchedItem;
use crate::services::watched::{self, MarkWatched};

/// Handler listing the caller's watched entries
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<Vec<WatchedItem>>> {
    let entries = watched::list(&state.pool, user_id).await?;
    Ok(Json(entries))
}

/// Handler marking a catalog item watched
pub async fn mark(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<MarkWatched>,
) -> AppResult<StatusCode> {
    watched::mark(&state.pool, user_id, request).await?;
    Ok(StatusCode::CREATED)
}

/// Handler removing a watched entry
pub async fn unmark(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(content_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    watched::unmark(&state.pool, user_id, content_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
