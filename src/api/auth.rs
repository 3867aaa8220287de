use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use uuid::Uuid;

use super::AppState;
use crate::error::AppError;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// session token
///
/// Extraction fails with `Unauthenticated` before the handler body runs,
/// so anonymous calls never reach protected work.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

/// Like [`CurrentUser`], but anonymous callers extract as `None` instead of
/// being rejected; for routes with a public fallback
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<Uuid>);

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthenticated)?;
        let user_id = state
            .identity
            .resolve(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(CurrentUser(user_id))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };

        let user_id = state.identity.resolve(token).await?;
        Ok(MaybeUser(user_id))
    }
}
