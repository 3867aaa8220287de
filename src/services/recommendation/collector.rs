use std::collections::HashMap;
use uuid::Uuid;

use crate::db::CatalogStore;
use crate::error::{AppError, AppResult};
use crate::models::{TasteProfile, WatchedRow};

/// Watched entries included in the prompt, most recent first
pub const RECENT_WATCHED_LIMIT: i64 = 10;

/// Assembles the facts needed to personalize the prompt
///
/// Lookup-table and watch-history fetch failures abort the whole pipeline
/// as upstream data errors; a missing preference row is treated as empty
/// preferences.
pub async fn collect(store: &dyn CatalogStore, user_id: Uuid) -> AppResult<TasteProfile> {
    // The two lookup fetches have no interdependency
    let (genres, languages) = tokio::try_join!(store.fetch_genres(), store.fetch_languages())
        .map_err(AppError::into_upstream)?;

    let genre_names: HashMap<Uuid, String> = genres.into_iter().map(|g| (g.id, g.name)).collect();
    let language_names: HashMap<Uuid, String> =
        languages.into_iter().map(|l| (l.id, l.name)).collect();

    let watched = store
        .fetch_watched(user_id, RECENT_WATCHED_LIMIT)
        .await
        .map_err(AppError::into_upstream)?;

    let preferences = store
        .fetch_preferences(user_id)
        .await
        .map_err(AppError::into_upstream)?
        .unwrap_or_default();

    let watched_lines = watched
        .iter()
        .map(|row| format_watched_line(row, &genre_names, &language_names))
        .collect();

    let preferred_genres = resolve_joined(&preferences.preferred_genre_ids, &genre_names, "any");
    let preferred_languages =
        resolve_joined(&preferences.preferred_language_ids, &language_names, "any");

    tracing::debug!(
        user_id = %user_id,
        watched = watched.len(),
        "Collected taste profile"
    );

    Ok(TasteProfile {
        watched_lines,
        preferred_genres,
        preferred_languages,
        genre_names,
        language_names,
    })
}

fn format_watched_line(
    row: &WatchedRow,
    genre_names: &HashMap<Uuid, String>,
    language_names: &HashMap<Uuid, String>,
) -> String {
    let genres = resolve_joined(&row.genre_ids, genre_names, "N/A");
    let languages = resolve_joined(&row.language_ids, language_names, "N/A");
    let rating = row
        .rating
        .map_or_else(|| "N/A".to_string(), |r| r.to_string());

    format!(
        "{} ({}, {}, {}) - Rated: {}/5",
        row.title, row.content_type, languages, genres, rating
    )
}

/// Resolves an id list to comma-joined display names
///
/// Identifiers that no longer resolve (lookup/catalog drift) are skipped;
/// `fallback` is used only when the whole list comes up empty.
fn resolve_joined(ids: &[Uuid], names: &HashMap<Uuid, String>, fallback: &str) -> String {
    let resolved: Vec<&str> = ids
        .iter()
        .filter_map(|id| names.get(id).map(String::as_str))
        .collect();

    if resolved.is_empty() {
        fallback.to_string()
    } else {
        resolved.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockCatalogStore;
    use crate::models::{ContentType, Genre, Language, UserPreferences};
    use chrono::Utc;

    fn names(entries: &[(Uuid, &str)]) -> HashMap<Uuid, String> {
        entries
            .iter()
            .map(|(id, name)| (*id, (*name).to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_joined_skips_unresolvable_ids() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let map = names(&[(known, "Sci-Fi")]);

        assert_eq!(resolve_joined(&[known, unknown], &map, "N/A"), "Sci-Fi");
    }

    #[test]
    fn test_resolve_joined_falls_back_when_nothing_resolves() {
        let map = names(&[]);
        assert_eq!(resolve_joined(&[Uuid::new_v4()], &map, "N/A"), "N/A");
        assert_eq!(resolve_joined(&[], &map, "any"), "any");
    }

    #[test]
    fn test_format_watched_line() {
        let genre = Uuid::new_v4();
        let language = Uuid::new_v4();
        let row = WatchedRow {
            content_id: Uuid::new_v4(),
            title: "Inception".to_string(),
            content_type: ContentType::Movie,
            genre_ids: vec![genre],
            language_ids: vec![language],
            rating: Some(5),
            watched_at: Utc::now(),
        };

        let line = format_watched_line(
            &row,
            &names(&[(genre, "Sci-Fi")]),
            &names(&[(language, "English")]),
        );

        assert_eq!(line, "Inception (movie, English, Sci-Fi) - Rated: 5/5");
    }

    #[test]
    fn test_format_watched_line_unrated() {
        let row = WatchedRow {
            content_id: Uuid::new_v4(),
            title: "The Matrix".to_string(),
            content_type: ContentType::Movie,
            genre_ids: vec![],
            language_ids: vec![],
            rating: None,
            watched_at: Utc::now(),
        };

        let line = format_watched_line(&row, &HashMap::new(), &HashMap::new());
        assert_eq!(line, "The Matrix (movie, N/A, N/A) - Rated: N/A/5");
    }

    #[tokio::test]
    async fn test_collect_with_empty_history_and_preferences() {
        let mut store = MockCatalogStore::new();
        store.expect_fetch_genres().returning(|| Ok(vec![]));
        store.expect_fetch_languages().returning(|| Ok(vec![]));
        store
            .expect_fetch_watched()
            .returning(|_, _| Ok(vec![]));
        store.expect_fetch_preferences().returning(|_| Ok(None));

        let profile = collect(&store, Uuid::new_v4()).await.unwrap();

        assert!(profile.watched_lines.is_empty());
        assert_eq!(profile.preferred_genres, "any");
        assert_eq!(profile.preferred_languages, "any");
    }

    #[tokio::test]
    async fn test_collect_resolves_preferences() {
        let genre = Uuid::new_v4();
        let language = Uuid::new_v4();

        let mut store = MockCatalogStore::new();
        store.expect_fetch_genres().returning(move || {
            Ok(vec![Genre {
                id: genre,
                name: "Sci-Fi".to_string(),
            }])
        });
        store.expect_fetch_languages().returning(move || {
            Ok(vec![Language {
                id: language,
                name: "English".to_string(),
            }])
        });
        store.expect_fetch_watched().returning(|_, _| Ok(vec![]));
        store.expect_fetch_preferences().returning(move |_| {
            Ok(Some(UserPreferences {
                preferred_genre_ids: vec![genre],
                preferred_language_ids: vec![language],
            }))
        });

        let profile = collect(&store, Uuid::new_v4()).await.unwrap();

        assert_eq!(profile.preferred_genres, "Sci-Fi");
        assert_eq!(profile.preferred_languages, "English");
    }

    #[tokio::test]
    async fn test_collect_surfaces_lookup_failure_as_upstream() {
        let mut store = MockCatalogStore::new();
        store
            .expect_fetch_genres()
            .returning(|| Err(AppError::Internal("genres table gone".to_string())));
        store.expect_fetch_languages().returning(|| Ok(vec![]));

        let err = collect(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamData(_)));
    }
}
