use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::db::{CatalogStore, PgCatalogStore};
use crate::error::AppResult;
use crate::services::identity::{IdentityProvider, PgIdentityProvider};
use crate::services::insights::InsightsClient;
use crate::services::recommendation::{
    GenerationProvider, OpenAiProvider, RecommendationPipeline,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub identity: Arc<dyn IdentityProvider>,
    pub pipeline: RecommendationPipeline,
    pub insights: InsightsClient,
}

impl AppState {
    /// Wires the production collaborators from configuration
    pub fn new(pool: PgPool, config: &Config) -> AppResult<Self> {
        let store: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(pool.clone()));
        let identity: Arc<dyn IdentityProvider> = Arc::new(PgIdentityProvider::new(pool.clone()));
        let generator: Arc<dyn GenerationProvider> = Arc::new(OpenAiProvider::new(
            config.generation_api_key.clone(),
            config.generation_api_url.clone(),
            config.generation_model.clone(),
        )?);
        let insights = InsightsClient::new(
            pool.clone(),
            config.insights_api_url.clone(),
            config.insights_api_key.clone(),
        )?;

        Ok(Self {
            pool,
            identity,
            pipeline: RecommendationPipeline::new(store, generator),
            insights,
        })
    }

    /// Wires explicit collaborators so tests can substitute a double for
    /// every external dependency
    pub fn with_collaborators(
        pool: PgPool,
        store: Arc<dyn CatalogStore>,
        identity: Arc<dyn IdentityProvider>,
        generator: Arc<dyn GenerationProvider>,
        insights: InsightsClient,
    ) -> Self {
        Self {
            pool,
            identity,
            pipeline: RecommendationPipeline::new(store, generator),
            insights,
        }
    }
}
