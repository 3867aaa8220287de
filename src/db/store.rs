use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    CatalogHit, Content, ContentType, Genre, Language, PlatformRef, UserPreferences, WatchedRow,
};

/// Read capabilities the recommendation pipeline consumes from the
/// catalog/lookup store
///
/// The pipeline takes this as an injected handle instead of talking to the
/// pool directly, so tests can substitute a double for every query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All genre lookup rows, unfiltered
    async fn fetch_genres(&self) -> AppResult<Vec<Genre>>;

    /// All language lookup rows, unfiltered
    async fn fetch_languages(&self) -> AppResult<Vec<Language>>;

    /// The user's watched entries joined with minimal catalog fields,
    /// most recent first, capped to `limit`
    async fn fetch_watched(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<WatchedRow>>;

    /// The user's preference row; `None` when the user has none
    async fn fetch_preferences(&self, user_id: Uuid) -> AppResult<Option<UserPreferences>>;

    /// Catalog rows whose title is exactly one of `titles`, with their
    /// platform associations
    async fn fetch_by_titles(&self, titles: Vec<String>) -> AppResult<Vec<CatalogHit>>;
}

/// Postgres-backed catalog store
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct WatchedEntryRow {
    content_id: Uuid,
    title: String,
    content_type: String,
    genre_ids: Vec<Uuid>,
    language_ids: Vec<Uuid>,
    rating: Option<i32>,
    watched_at: DateTime<Utc>,
}

impl From<WatchedEntryRow> for WatchedRow {
    fn from(row: WatchedEntryRow) -> Self {
        Self {
            content_id: row.content_id,
            title: row.title,
            content_type: ContentType::parse_or_movie(&row.content_type),
            genre_ids: row.genre_ids,
            language_ids: row.language_ids,
            rating: row.rating,
            watched_at: row.watched_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ContentRow {
    pub id: Uuid,
    pub title: String,
    pub content_type: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<f32>,
    pub duration_minutes: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub genre_ids: Vec<Uuid>,
    pub language_ids: Vec<Uuid>,
}

impl From<ContentRow> for Content {
    fn from(row: ContentRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content_type: ContentType::parse_or_movie(&row.content_type),
            description: row.description,
            release_year: row.release_year,
            rating: row.rating,
            duration_minutes: row.duration_minutes,
            poster_url: row.poster_url,
            backdrop_url: row.backdrop_url,
            genre_ids: row.genre_ids,
            language_ids: row.language_ids,
        }
    }
}

pub(crate) const CONTENT_COLUMNS: &str = "id, title, content_type, description, release_year, \
     rating, duration_minutes, poster_url, backdrop_url, genre_ids, language_ids";

#[derive(sqlx::FromRow)]
struct PlatformJoinRow {
    content_id: Uuid,
    name: String,
    icon_url: Option<String>,
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn fetch_genres(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    async fn fetch_languages(&self) -> AppResult<Vec<Language>> {
        let languages =
            sqlx::query_as::<_, Language>("SELECT id, name FROM languages ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(languages)
    }

    async fn fetch_watched(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<WatchedRow>> {
        let rows = sqlx::query_as::<_, WatchedEntryRow>(
            r#"
            SELECT w.content_id, c.title, c.content_type, c.genre_ids, c.language_ids,
                   w.rating, w.watched_at
            FROM watched_entries w
            JOIN content c ON c.id = w.content_id
            WHERE w.user_id = $1
            ORDER BY w.watched_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WatchedRow::from).collect())
    }

    async fn fetch_preferences(&self, user_id: Uuid) -> AppResult<Option<UserPreferences>> {
        let prefs = sqlx::query_as::<_, (Vec<Uuid>, Vec<Uuid>)>(
            "SELECT preferred_genre_ids, preferred_language_ids \
             FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prefs.map(
            |(preferred_genre_ids, preferred_language_ids)| UserPreferences {
                preferred_genre_ids,
                preferred_language_ids,
            },
        ))
    }

    async fn fetch_by_titles(&self, titles: Vec<String>) -> AppResult<Vec<CatalogHit>> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE title = ANY($1)"
        ))
        .bind(&titles)
        .fetch_all(&self.pool)
        .await?;

        let content: Vec<Content> = rows.into_iter().map(Content::from).collect();
        let content_ids: Vec<Uuid> = content.iter().map(|c| c.id).collect();

        let platform_rows = sqlx::query_as::<_, PlatformJoinRow>(
            r#"
            SELECT cp.content_id, p.name, p.icon_url
            FROM content_platforms cp
            JOIN platforms p ON p.id = cp.platform_id
            WHERE cp.content_id = ANY($1)
            "#,
        )
        .bind(&content_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut platforms_by_content: HashMap<Uuid, Vec<PlatformRef>> = HashMap::new();
        for row in platform_rows {
            platforms_by_content
                .entry(row.content_id)
                .or_default()
                .push(PlatformRef {
                    name: row.name,
                    icon_url: row.icon_url,
                });
        }

        Ok(content
            .into_iter()
            .map(|c| {
                let platforms = platforms_by_content.remove(&c.id).unwrap_or_default();
                CatalogHit {
                    content: c,
                    platforms,
                }
            })
            .collect())
    }
}
