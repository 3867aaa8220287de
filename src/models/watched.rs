use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ContentType;

/// A watched entry joined with the minimal catalog fields the
/// recommendation pipeline needs
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedRow {
    pub content_id: Uuid,
    pub title: String,
    pub content_type: ContentType,
    pub genre_ids: Vec<Uuid>,
    pub language_ids: Vec<Uuid>,
    pub rating: Option<i32>,
    pub watched_at: DateTime<Utc>,
}

/// A watched entry shaped for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchedItem {
    pub content_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub poster_url: Option<String>,
    pub rating: Option<i32>,
    pub watched_at: DateTime<Utc>,
}
