use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{Content, ContentType, NamedRef, PlatformRef};

/// A suggestion produced by the text-generation model, after validation
///
/// Has no stable identifier until it is reconciled against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestedItem {
    pub title: String,
    pub content_type: ContentType,
    pub description: String,
}

/// A catalog row matched by exact title, with its platform associations
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogHit {
    pub content: Content,
    pub platforms: Vec<PlatformRef>,
}

/// The facts collected to personalize the recommendation prompt
#[derive(Debug, Clone)]
pub struct TasteProfile {
    /// One formatted line per watched item, most recent first
    pub watched_lines: Vec<String>,
    /// Comma-joined preferred genre names, `"any"` when none
    pub preferred_genres: String,
    /// Comma-joined preferred language names, `"any"` when none
    pub preferred_languages: String,
    pub genre_names: HashMap<Uuid, String>,
    pub language_names: HashMap<Uuid, String>,
}

/// A recommendation merged with catalog data, ready for display
///
/// Either an enriched catalog item (id is the catalog uuid) or a synthetic
/// record with an `ai-rec-` identifier for titles absent from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciledRecommendation {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub poster_url: Option<String>,
    pub release_year: Option<i32>,
    pub genres: Vec<NamedRef>,
    pub languages: Vec<NamedRef>,
    pub platforms: Vec<PlatformRef>,
}
