use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("You must be logged in")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream data error: {0}")]
    UpstreamData(String),

    #[error("Generation failure: {0}")]
    Generation(String),

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Reclassifies a lookup/catalog/watch-history fetch failure as an
    /// upstream data error so the whole pipeline invocation aborts with it.
    pub fn into_upstream(self) -> Self {
        match self {
            AppError::UpstreamData(_) => self,
            other => AppError::UpstreamData(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamData(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            // Provider-internal detail stays in the logs; clients get a
            // generic message.
            AppError::Generation(detail) | AppError::MalformedModelOutput(detail) => {
                tracing::error!(error = %detail, "Recommendation generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate recommendations".to_string(),
                )
            }
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
