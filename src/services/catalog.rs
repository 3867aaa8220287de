use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::store::{ContentRow, CONTENT_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::models::{Content, ContentResponse};

/// Sort order for catalog listings
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Rating,
    Year,
    Title,
}

impl SortKey {
    fn order_clause(self) -> &'static str {
        match self {
            SortKey::Rating => "rating DESC NULLS LAST",
            SortKey::Year => "release_year DESC NULLS LAST",
            SortKey::Title => "title ASC",
        }
    }
}

/// Query filters for the catalog listing
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFilter {
    /// `movie`, `tv_show`, or absent/`all` for everything
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub genre: Option<Uuid>,
    /// Case-insensitive title substring
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

/// Lists catalog items with filters, lookup ids resolved to names
pub async fn list(pool: &PgPool, filter: CatalogFilter) -> AppResult<Vec<ContentResponse>> {
    let content_type = filter.content_type.filter(|t| t != "all");

    let query = format!(
        "SELECT {CONTENT_COLUMNS} FROM content \
         WHERE ($1::text IS NULL OR content_type = $1) \
           AND ($2::uuid IS NULL OR $2 = ANY(genre_ids)) \
           AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%') \
         ORDER BY {}",
        filter.sort.order_clause()
    );

    let rows = sqlx::query_as::<_, ContentRow>(&query)
        .bind(content_type)
        .bind(filter.genre)
        .bind(filter.search)
        .fetch_all(pool)
        .await?;

    let genre_names = genre_name_map(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| ContentResponse::from_content(Content::from(row), &genre_names))
        .collect())
}

/// Fetches a single catalog item by id
pub async fn get(pool: &PgPool, id: Uuid) -> AppResult<ContentResponse> {
    let row = sqlx::query_as::<_, ContentRow>(&format!(
        "SELECT {CONTENT_COLUMNS} FROM content WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

    let genre_names = genre_name_map(pool).await?;
    Ok(ContentResponse::from_content(Content::from(row), &genre_names))
}

pub(crate) async fn genre_name_map(pool: &PgPool) -> AppResult<HashMap<Uuid, String>> {
    let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM genres")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_deserializes_from_query_values() {
        assert_eq!(
            serde_json::from_str::<SortKey>("\"rating\"").unwrap(),
            SortKey::Rating
        );
        assert_eq!(
            serde_json::from_str::<SortKey>("\"year\"").unwrap(),
            SortKey::Year
        );
        assert_eq!(
            serde_json::from_str::<SortKey>("\"title\"").unwrap(),
            SortKey::Title
        );
    }

    #[test]
    fn test_sort_key_defaults_to_rating() {
        assert_eq!(SortKey::default(), SortKey::Rating);
    }

    #[test]
    fn test_order_clause_per_key() {
        assert_eq!(SortKey::Rating.order_clause(), "rating DESC NULLS LAST");
        assert_eq!(SortKey::Year.order_clause(), "release_year DESC NULLS LAST");
        assert_eq!(SortKey::Title.order_clause(), "title ASC");
    }
}
