use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::error::AppResult;
use crate::models::ContentResponse;
use crate::services::catalog::{self, CatalogFilter};

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<ContentResponse>,
}

/// Handler for the catalog listing with filters
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> AppResult<Json<MoviesResponse>> {
    let movies = catalog::list(&state.pool, filter).await?;
    Ok(Json(MoviesResponse { movies }))
}

/// Handler for a single catalog item
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContentResponse>> {
    let movie = catalog::get(&state.pool, id).await?;
    Ok(Json(movie))
}
