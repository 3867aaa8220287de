use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub system: SystemHealth,
}

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_content: i64,
    pub total_ratings: i64,
    pub total_watched: i64,
}

/// Static health block; real probing is out of scope for the dashboard
#[derive(Debug, Serialize)]
pub struct SystemHealth {
    pub server_status: &'static str,
    pub database_status: &'static str,
    pub insights_service_status: &'static str,
}

/// Aggregate counts for the admin dashboard
pub async fn dashboard(pool: &PgPool) -> AppResult<AdminDashboard> {
    let total_users = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT user_id) FROM ( \
             SELECT user_id FROM user_ratings \
             UNION SELECT user_id FROM watched_entries \
         ) AS active_users",
    )
    .fetch_one(pool)
    .await?;

    let total_content = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM content")
        .fetch_one(pool)
        .await?;

    let total_ratings = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_ratings")
        .fetch_one(pool)
        .await?;

    let total_watched = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM watched_entries")
        .fetch_one(pool)
        .await?;

    Ok(AdminDashboard {
        stats: AdminStats {
            total_users,
            total_content,
            total_ratings,
            total_watched,
        },
        system: SystemHealth {
            server_status: "healthy",
            database_status: "healthy",
            insights_service_status: "unknown",
        },
    })
}
