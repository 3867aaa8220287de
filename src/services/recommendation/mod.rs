mod collector;
mod generator;
mod prompt;
mod reconcile;

pub use generator::{GenerationProvider, OpenAiProvider};

#[cfg(test)]
pub use generator::MockGenerationProvider;

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::CatalogStore;
use crate::error::{AppError, AppResult};
use crate::models::ReconciledRecommendation;

/// AI recommendation pipeline: collect, build prompt, generate, reconcile
///
/// The four steps run sequentially; any failure aborts the invocation with
/// no partial result. Re-invoking with the same user may return a different
/// set, since the generation call is non-deterministic.
#[derive(Clone)]
pub struct RecommendationPipeline {
    store: Arc<dyn CatalogStore>,
    generator: Arc<dyn GenerationProvider>,
}

/// Result of one pipeline invocation
#[derive(Debug, Serialize)]
pub struct RecommendationOutcome {
    /// Raw generator text, passed through for display
    pub recommendations: String,
    /// Reconciled, deduplicated list in the model's order
    pub final_recommendations: Vec<ReconciledRecommendation>,
}

impl RecommendationPipeline {
    pub fn new(store: Arc<dyn CatalogStore>, generator: Arc<dyn GenerationProvider>) -> Self {
        Self { store, generator }
    }

    pub async fn run(&self, user_id: Uuid) -> AppResult<RecommendationOutcome> {
        let profile = collector::collect(self.store.as_ref(), user_id).await?;
        let prompt = prompt::build_prompt(&profile);

        let raw = self.generator.generate(prompt).await?;
        let suggestions = generator::parse_suggestions(&raw)?;

        tracing::info!(
            user_id = %user_id,
            suggested = suggestions.len(),
            "Model suggestions parsed"
        );

        let titles: Vec<String> = suggestions.iter().map(|s| s.title.clone()).collect();
        let catalog = self
            .store
            .fetch_by_titles(titles)
            .await
            .map_err(AppError::into_upstream)?;

        let final_recommendations = reconcile::reconcile(
            suggestions,
            catalog,
            &profile.genre_names,
            &profile.language_names,
        );

        Ok(RecommendationOutcome {
            recommendations: raw,
            final_recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockCatalogStore;
    use crate::models::{
        CatalogHit, Content, ContentType, Genre, PlatformRef, UserPreferences, WatchedRow,
    };
    use chrono::{Duration, Utc};

    fn watched(title: &str, rating: i32, genre: Uuid, minutes_ago: i64) -> WatchedRow {
        WatchedRow {
            content_id: Uuid::new_v4(),
            title: title.to_string(),
            content_type: ContentType::Movie,
            genre_ids: vec![genre],
            language_ids: vec![],
            rating: Some(rating),
            watched_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn matrix_hit(id: Uuid) -> CatalogHit {
        CatalogHit {
            content: Content {
                id,
                title: "The Matrix".to_string(),
                content_type: ContentType::Movie,
                description: Some("A hacker discovers reality.".to_string()),
                release_year: Some(1999),
                rating: Some(8.7),
                duration_minutes: Some(136),
                poster_url: Some("https://img.example/matrix.jpg".to_string()),
                backdrop_url: None,
                genre_ids: vec![],
                language_ids: vec![],
            },
            platforms: vec![PlatformRef {
                name: "Netflix".to_string(),
                icon_url: None,
            }],
        }
    }

    fn store_with_history(genre: Uuid, catalog: Vec<CatalogHit>) -> MockCatalogStore {
        let mut store = MockCatalogStore::new();
        store.expect_fetch_genres().returning(move || {
            Ok(vec![Genre {
                id: genre,
                name: "Sci-Fi".to_string(),
            }])
        });
        store.expect_fetch_languages().returning(|| Ok(vec![]));
        store.expect_fetch_watched().returning(move |_, _| {
            Ok(vec![
                watched("Inception", 5, genre, 1),
                watched("The Matrix", 4, genre, 2),
            ])
        });
        store.expect_fetch_preferences().returning(move |_| {
            Ok(Some(UserPreferences {
                preferred_genre_ids: vec![genre],
                preferred_language_ids: vec![],
            }))
        });
        store
            .expect_fetch_by_titles()
            .returning(move |_| Ok(catalog.clone()));
        store
    }

    #[tokio::test]
    async fn test_pipeline_matches_catalog_and_synthesizes_misses() {
        let genre = Uuid::new_v4();
        let matrix_id = Uuid::new_v4();
        let store = store_with_history(genre, vec![matrix_hit(matrix_id)]);

        let mut generator = MockGenerationProvider::new();
        generator.expect_generate().returning(|prompt| {
            // The prompt carries the collected profile
            assert!(prompt.contains("Inception (movie, N/A, Sci-Fi) - Rated: 5/5"));
            assert!(prompt.contains("Their preferred genres are: Sci-Fi"));
            Ok(r#"[
                {"title":"The Matrix","type":"movie","description":"x"},
                {"title":"Arrival","type":"movie","description":"y"}
            ]"#
            .to_string())
        });

        let pipeline = RecommendationPipeline::new(Arc::new(store), Arc::new(generator));
        let outcome = pipeline.run(Uuid::new_v4()).await.unwrap();

        let recs = &outcome.final_recommendations;
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].id, matrix_id.to_string());
        assert_eq!(recs[0].title, "The Matrix");
        assert_eq!(
            recs[0].description.as_deref(),
            Some("A hacker discovers reality.")
        );
        assert_eq!(recs[0].platforms[0].name, "Netflix");

        assert_eq!(recs[1].id, "ai-rec-arrival-movie");
        assert_eq!(recs[1].description.as_deref(), Some("y"));
        assert!(recs[1].genres.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_deduplicates_repeated_suggestions() {
        let genre = Uuid::new_v4();
        let matrix_id = Uuid::new_v4();
        let store = store_with_history(genre, vec![matrix_hit(matrix_id)]);

        let mut generator = MockGenerationProvider::new();
        generator.expect_generate().returning(|_| {
            Ok(r#"[
                {"title":"The Matrix","type":"movie","description":"x"},
                {"title":"The Matrix","type":"movie","description":"again"}
            ]"#
            .to_string())
        });

        let pipeline = RecommendationPipeline::new(Arc::new(store), Arc::new(generator));
        let outcome = pipeline.run(Uuid::new_v4()).await.unwrap();

        assert_eq!(outcome.final_recommendations.len(), 1);
        assert_eq!(outcome.final_recommendations[0].id, matrix_id.to_string());
    }

    #[tokio::test]
    async fn test_pipeline_returns_empty_list_for_empty_model_array() {
        let genre = Uuid::new_v4();
        let store = store_with_history(genre, vec![]);

        let mut generator = MockGenerationProvider::new();
        generator
            .expect_generate()
            .returning(|_| Ok("[]".to_string()));

        let pipeline = RecommendationPipeline::new(Arc::new(store), Arc::new(generator));
        let outcome = pipeline.run(Uuid::new_v4()).await.unwrap();

        assert!(outcome.final_recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_fails_on_malformed_model_output() {
        // The catalog lookup must never run when the parse fails
        let mut store = MockCatalogStore::new();
        store.expect_fetch_genres().returning(|| Ok(vec![]));
        store.expect_fetch_languages().returning(|| Ok(vec![]));
        store.expect_fetch_watched().returning(|_, _| Ok(vec![]));
        store.expect_fetch_preferences().returning(|_| Ok(None));
        store.expect_fetch_by_titles().never();

        let mut generator = MockGenerationProvider::new();
        generator
            .expect_generate()
            .returning(|_| Ok("Sure! Here are my picks:".to_string()));

        let pipeline = RecommendationPipeline::new(Arc::new(store), Arc::new(generator));
        let err = pipeline.run(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::MalformedModelOutput(_)));
    }

    #[tokio::test]
    async fn test_pipeline_surfaces_generation_failure() {
        let genre = Uuid::new_v4();
        let store = store_with_history(genre, vec![]);

        let mut generator = MockGenerationProvider::new();
        generator
            .expect_generate()
            .returning(|_| Err(AppError::Generation("timed out".to_string())));

        let pipeline = RecommendationPipeline::new(Arc::new(store), Arc::new(generator));
        let err = pipeline.run(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_pipeline_aborts_before_generation_on_lookup_failure() {
        let mut store = MockCatalogStore::new();
        store
            .expect_fetch_genres()
            .returning(|| Err(AppError::Internal("boom".to_string())));
        store.expect_fetch_languages().returning(|| Ok(vec![]));
        store.expect_fetch_by_titles().never();

        let mut generator = MockGenerationProvider::new();
        generator.expect_generate().never();

        let pipeline = RecommendationPipeline::new(Arc::new(store), Arc::new(generator));
        let err = pipeline.run(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::UpstreamData(_)));
    }
}
