use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::models::{ContentType, SuggestedItem};

/// Timeout for the external generation call
const GENERATION_TIMEOUT_SECS: u64 = 30;

/// External text-generation capability
///
/// One prompt in, raw response text out. A single blocking call with no
/// retry: a transient provider failure surfaces immediately as a
/// generation failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, prompt: String) -> AppResult<String>;
}

/// Chat-completions provider for any OpenAI-compatible endpoint
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(GENERATION_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    async fn generate(&self, prompt: String) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Generation API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::Generation("Generation API returned no choices".to_string())
            })?;

        tracing::debug!(chars = text.len(), model = %self.model, "Generation completed");

        Ok(text)
    }
}

/// Raw suggestion object as returned by the model
#[derive(Deserialize)]
struct RawSuggestion {
    title: String,
    #[serde(rename = "type", default)]
    content_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parses the model's reply strictly as a JSON array of suggestion objects
///
/// The reply is untrusted input: `type` is coerced (anything unrecognized
/// becomes `movie`) and `description` defaults to empty, but a reply that is
/// not a JSON array, or a suggestion with a missing or blank title, fails the
/// whole parse. No repair heuristics are applied; the raw text goes to the
/// debug log for diagnosis.
pub fn parse_suggestions(raw: &str) -> AppResult<Vec<SuggestedItem>> {
    let parsed: Vec<RawSuggestion> = serde_json::from_str(raw.trim()).map_err(|e| {
        tracing::debug!(raw = %raw, "Unparseable model output");
        AppError::MalformedModelOutput(e.to_string())
    })?;

    let mut suggestions = Vec::with_capacity(parsed.len());
    for item in parsed {
        let title = item.title.trim().to_string();
        if title.is_empty() {
            tracing::debug!(raw = %raw, "Model output contained an empty title");
            return Err(AppError::MalformedModelOutput(
                "suggestion with empty title".to_string(),
            ));
        }

        let content_type = item
            .content_type
            .as_deref()
            .map_or(ContentType::Movie, ContentType::parse_or_movie);

        suggestions.push(SuggestedItem {
            title,
            content_type,
            description: item.description.unwrap_or_default(),
        });
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_array() {
        let raw = r#"[
            { "title": "Arrival", "type": "movie", "description": "First contact." },
            { "title": "Dark", "type": "tv_show", "description": "Time travel." }
        ]"#;

        let suggestions = parse_suggestions(raw).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].title, "Arrival");
        assert_eq!(suggestions[0].content_type, ContentType::Movie);
        assert_eq!(suggestions[1].content_type, ContentType::TvShow);
    }

    #[test]
    fn test_parse_empty_array_is_valid() {
        let suggestions = parse_suggestions("[]").unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let suggestions = parse_suggestions("\n  [{ \"title\": \"Arrival\" }]  \n").unwrap();
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_suggestions("Here are some great picks!").unwrap_err();
        assert!(matches!(err, AppError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_parse_rejects_non_array_json() {
        let err = parse_suggestions(r#"{"title": "Arrival"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_parse_rejects_missing_title() {
        let err = parse_suggestions(r#"[{"type": "movie"}]"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_parse_rejects_blank_title() {
        let err = parse_suggestions(r#"[{"title": "   "}]"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_parse_coerces_missing_and_unknown_type_to_movie() {
        let raw = r#"[
            { "title": "Arrival" },
            { "title": "Dark", "type": "miniseries" }
        ]"#;

        let suggestions = parse_suggestions(raw).unwrap();
        assert_eq!(suggestions[0].content_type, ContentType::Movie);
        assert_eq!(suggestions[1].content_type, ContentType::Movie);
    }

    #[test]
    fn test_parse_defaults_missing_description_to_empty() {
        let suggestions = parse_suggestions(r#"[{"title": "Arrival"}]"#).unwrap();
        assert_eq!(suggestions[0].description, "");
    }

    #[test]
    fn test_parse_trims_titles() {
        let suggestions = parse_suggestions(r#"[{"title": "  Arrival  "}]"#).unwrap();
        assert_eq!(suggestions[0].title, "Arrival");
    }
}
