use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Timeout for microservice calls
const PROXY_TIMEOUT_SECS: u64 = 5;

/// Recent search-history rows forwarded with each search
const SEARCH_HISTORY_LIMIT: i64 = 50;

/// Client for the external analytics/search microservice
///
/// Both endpoints are authenticated pass-throughs; the response body is
/// forwarded to the caller unchanged.
#[derive(Clone)]
pub struct InsightsClient {
    http_client: HttpClient,
    pool: PgPool,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub filters: Value,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    pub time_range: String,
}

impl InsightsClient {
    pub fn new(pool: PgPool, api_url: String, api_key: String) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(PROXY_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            pool,
            api_url,
            api_key,
        })
    }

    /// Forwards a search to the microservice, enriched with the user's
    /// stored preferences and recent search history, then logs the query
    pub async fn search(&self, user_id: Uuid, request: SearchRequest) -> AppResult<Value> {
        let preferences = self.user_preferences(user_id).await?;
        let history = self.search_history(user_id).await?;

        let url = format!("{}/search", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "query": request.query,
                "filters": request.filters,
                "user_id": user_id,
                "user_preferences": preferences,
                "search_history": history,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamData(format!(
                "Search service returned status {}",
                response.status()
            )));
        }

        let results: Value = response.json().await?;
        let result_count = results
            .get("results")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        self.log_search(user_id, &request.query, result_count as i32)
            .await?;

        tracing::info!(user_id = %user_id, results = result_count, "Search completed");

        Ok(results)
    }

    /// Forwards an analytics request for the given time range
    pub async fn analytics(&self, user_id: Uuid, request: AnalyticsRequest) -> AppResult<Value> {
        let url = format!("{}/analytics", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "time_range": request.time_range,
                "user_id": user_id,
                "include_user_specific": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamData(format!(
                "Analytics service returned status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn user_preferences(&self, user_id: Uuid) -> AppResult<Value> {
        let prefs = sqlx::query_as::<_, (Vec<Uuid>, Vec<Uuid>)>(
            "SELECT preferred_genre_ids, preferred_language_ids \
             FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match prefs {
            Some((genres, languages)) => json!({
                "preferred_genre_ids": genres,
                "preferred_language_ids": languages,
            }),
            None => json!({}),
        })
    }

    async fn search_history(&self, user_id: Uuid) -> AppResult<Value> {
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT query, searched_at FROM search_history \
             WHERE user_id = $1 ORDER BY searched_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(SEARCH_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(Value::Array(
            rows.into_iter()
                .map(|(query, searched_at)| json!({ "query": query, "searched_at": searched_at }))
                .collect(),
        ))
    }

    async fn log_search(&self, user_id: Uuid, query: &str, result_count: i32) -> AppResult<()> {
        sqlx::query("INSERT INTO search_history (user_id, query, result_count) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(query)
            .bind(result_count)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
