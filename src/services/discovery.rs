use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::db::store::{ContentRow, CONTENT_COLUMNS};
use crate::error::AppResult;
use crate::models::{Content, ContentResponse};
use crate::services::catalog;

/// Items returned by a discovery query
const DISCOVERY_LIMIT: i64 = 20;

/// Ratings at or above this count as a taste signal
const TASTE_RATING_FLOOR: i32 = 4;

/// Minimum catalog score for genre-overlap picks
const CATALOG_RATING_FLOOR: f32 = 7.0;

/// Caller-level discovery list, separate from the AI pipeline
///
/// Authenticated users with taste signals get genre-overlap picks
/// excluding what they already rated; anonymous callers and users without
/// signals get the top-rated catalog slice. The AI pipeline never falls
/// back to this list.
pub async fn recommendations(pool: &PgPool, user: Option<Uuid>) -> AppResult<Vec<ContentResponse>> {
    let Some(user_id) = user else {
        return popular(pool).await;
    };

    let rated = sqlx::query_as::<_, (Uuid, Vec<Uuid>)>(
        r#"
        SELECT c.id, c.genre_ids
        FROM user_ratings r
        JOIN content c ON c.id = r.content_id
        WHERE r.user_id = $1 AND r.rating >= $2
        "#,
    )
    .bind(user_id)
    .bind(TASTE_RATING_FLOOR)
    .fetch_all(pool)
    .await?;

    let mut preferred_genres: HashSet<Uuid> = HashSet::new();
    let mut rated_ids: Vec<Uuid> = Vec::with_capacity(rated.len());
    for (id, genre_ids) in rated {
        preferred_genres.extend(genre_ids);
        rated_ids.push(id);
    }

    if preferred_genres.is_empty() {
        return popular(pool).await;
    }

    let genre_filter: Vec<Uuid> = preferred_genres.into_iter().collect();

    let rows = sqlx::query_as::<_, ContentRow>(&format!(
        "SELECT {CONTENT_COLUMNS} FROM content \
         WHERE genre_ids && $1 \
           AND NOT (id = ANY($2)) \
           AND rating >= $3 \
         ORDER BY rating DESC NULLS LAST \
         LIMIT $4"
    ))
    .bind(&genre_filter)
    .bind(&rated_ids)
    .bind(CATALOG_RATING_FLOOR)
    .bind(DISCOVERY_LIMIT)
    .fetch_all(pool)
    .await?;

    let genre_names = catalog::genre_name_map(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| ContentResponse::from_content(Content::from(row), &genre_names))
        .collect())
}

async fn popular(pool: &PgPool) -> AppResult<Vec<ContentResponse>> {
    let rows = sqlx::query_as::<_, ContentRow>(&format!(
        "SELECT {CONTENT_COLUMNS} FROM content ORDER BY rating DESC NULLS LAST LIMIT $1"
    ))
    .bind(DISCOVERY_LIMIT)
    .fetch_all(pool)
    .await?;

    let genre_names = catalog::genre_name_map(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| ContentResponse::from_content(Content::from(row), &genre_names))
        .collect())
}
