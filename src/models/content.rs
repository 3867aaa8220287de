use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type of catalog content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    /// Parses a stored or model-provided type string.
    ///
    /// Anything that is not exactly `tv_show` falls back to `movie`, which is
    /// also the coercion rule for unrecognized model output.
    pub fn parse_or_movie(raw: &str) -> Self {
        match raw {
            "tv_show" => ContentType::TvShow,
            _ => ContentType::Movie,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::TvShow => "tv_show",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A movie or TV-show row in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub content_type: ContentType,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    /// Catalog-level score, used for "popular" ordering
    pub rating: Option<f32>,
    pub duration_minutes: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub genre_ids: Vec<Uuid>,
    pub language_ids: Vec<Uuid>,
}

/// Catalog item shaped for API responses, with lookup ids resolved to names
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub id: Uuid,
    pub title: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub imdb_rating: Option<f32>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub duration: Option<i32>,
}

impl ContentResponse {
    pub fn from_content(content: Content, genre_names: &std::collections::HashMap<Uuid, String>) -> Self {
        let genres = content
            .genre_ids
            .iter()
            .filter_map(|id| genre_names.get(id).cloned())
            .collect();

        Self {
            id: content.id,
            title: content.title,
            overview: content.description,
            poster_url: content.poster_url,
            backdrop_url: content.backdrop_url,
            year: content.release_year,
            genres,
            imdb_rating: content.rating,
            content_type: content.content_type,
            duration: content.duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_movie_known_types() {
        assert_eq!(ContentType::parse_or_movie("movie"), ContentType::Movie);
        assert_eq!(ContentType::parse_or_movie("tv_show"), ContentType::TvShow);
    }

    #[test]
    fn test_parse_or_movie_defaults_unknown_to_movie() {
        assert_eq!(ContentType::parse_or_movie("series"), ContentType::Movie);
        assert_eq!(ContentType::parse_or_movie(""), ContentType::Movie);
    }

    #[test]
    fn test_content_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ContentType::Movie).unwrap(),
            "\"movie\""
        );
        assert_eq!(
            serde_json::to_string(&ContentType::TvShow).unwrap(),
            "\"tv_show\""
        );
    }
}
