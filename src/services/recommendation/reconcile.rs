use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::{
    CatalogHit, ContentType, NamedRef, ReconciledRecommendation, SuggestedItem,
};

/// Merges model suggestions with catalog rows into the display-ready list
///
/// Matching is exact string equality on the title. Catalog hits keep the
/// catalog identifier and metadata; misses get a synthetic record. The
/// output is deduplicated by identifier, first occurrence wins, so the
/// model's relevance ordering is preserved.
pub fn reconcile(
    suggestions: Vec<SuggestedItem>,
    catalog: Vec<CatalogHit>,
    genre_names: &HashMap<Uuid, String>,
    language_names: &HashMap<Uuid, String>,
) -> Vec<ReconciledRecommendation> {
    let by_title: HashMap<&str, &CatalogHit> = catalog
        .iter()
        .map(|hit| (hit.content.title.as_str(), hit))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut reconciled = Vec::with_capacity(suggestions.len());

    for suggestion in &suggestions {
        let entry = match by_title.get(suggestion.title.as_str()) {
            Some(hit) => from_catalog(suggestion, hit, genre_names, language_names),
            None => from_suggestion(suggestion),
        };

        if seen.insert(entry.id.clone()) {
            reconciled.push(entry);
        }
    }

    reconciled
}

fn from_catalog(
    suggestion: &SuggestedItem,
    hit: &CatalogHit,
    genre_names: &HashMap<Uuid, String>,
    language_names: &HashMap<Uuid, String>,
) -> ReconciledRecommendation {
    let content = &hit.content;

    // Catalog description wins unless it is missing or blank
    let description = content
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .or_else(|| non_empty(&suggestion.description));

    ReconciledRecommendation {
        id: content.id.to_string(),
        title: content.title.clone(),
        description,
        content_type: content.content_type,
        poster_url: content.poster_url.clone(),
        release_year: content.release_year,
        genres: resolve_refs(&content.genre_ids, genre_names),
        languages: resolve_refs(&content.language_ids, language_names),
        platforms: hit.platforms.clone(),
    }
}

fn from_suggestion(suggestion: &SuggestedItem) -> ReconciledRecommendation {
    ReconciledRecommendation {
        id: synthetic_id(&suggestion.title, suggestion.content_type),
        title: suggestion.title.clone(),
        description: non_empty(&suggestion.description),
        content_type: suggestion.content_type,
        poster_url: Some(placeholder_poster(&suggestion.title)),
        release_year: None,
        genres: Vec::new(),
        languages: Vec::new(),
        platforms: Vec::new(),
    }
}

/// Deterministic fallback identifier for a title absent from the catalog:
/// `ai-rec-<slug>-<type>`
fn synthetic_id(title: &str, content_type: ContentType) -> String {
    let lowered = title.to_lowercase();
    let slug = lowered.split_whitespace().collect::<Vec<_>>().join("-");
    format!("ai-rec-{}-{}", slug, content_type.as_str())
}

/// Query-string placeholder image reference, since no real asset exists
fn placeholder_poster(title: &str) -> String {
    format!(
        "/placeholder.svg?height=300&width=200&query={}",
        urlencoding::encode(&format!("{title} poster"))
    )
}

fn resolve_refs(ids: &[Uuid], names: &HashMap<Uuid, String>) -> Vec<NamedRef> {
    ids.iter()
        .filter_map(|id| {
            names.get(id).map(|name| NamedRef {
                id: *id,
                name: name.clone(),
            })
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
