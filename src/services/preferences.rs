use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::UserPreferences;

/// Fetches the user's preferences; a missing row is empty preferences
pub async fn get(pool: &PgPool, user_id: Uuid) -> AppResult<UserPreferences> {
    let prefs = sqlx::query_as::<_, (Vec<Uuid>, Vec<Uuid>)>(
        "SELECT preferred_genre_ids, preferred_language_ids \
         FROM user_preferences WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(prefs
        .map(
            |(preferred_genre_ids, preferred_language_ids)| UserPreferences {
                preferred_genre_ids,
                preferred_language_ids,
            },
        )
        .unwrap_or_default())
}

/// Replaces the user's preference lists
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    prefs: UserPreferences,
) -> AppResult<UserPreferences> {
    sqlx::query(
        r#"
        INSERT INTO user_preferences (user_id, preferred_genre_ids, preferred_language_ids)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET preferred_genre_ids = EXCLUDED.preferred_genre_ids,
                      preferred_language_ids = EXCLUDED.preferred_language_ids
        "#,
    )
    .bind(user_id)
    .bind(&prefs.preferred_genre_ids)
    .bind(&prefs.preferred_language_ids)
    .execute(pool)
    .await?;

    Ok(prefs)
}
