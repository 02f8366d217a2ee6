use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::models::{ActivityCounts, DailyActivity};

/// Read-only aggregates over `reviews`.
///
/// `utc_offset_minutes` shifts `created_at` before truncating it to a date,
/// so "day" always means a local calendar day.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn activity_on(
        &self,
        email: &str,
        day: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<ActivityCounts>;

    /// Days on or after `from` with at least one review, newest first
    async fn daily_activity_since(
        &self,
        email: &str,
        from: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<Vec<DailyActivity>>;
}

pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn activity_on(
        &self,
        email: &str,
        day: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<ActivityCounts> {
        sqlx::query_as::<_, ActivityCounts>(
            r#"
            SELECT
                COUNT(r.id) AS reviews,
                COALESCE(SUM(r.review_score), 0)::BIGINT AS likes
            FROM reviews r
            WHERE r.reviewer_email = $1
              AND ((r.created_at AT TIME ZONE 'UTC') + make_interval(mins => $3))::date = $2
            "#,
        )
        .bind(email)
        .bind(day)
        .bind(utc_offset_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count today's reviews: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn daily_activity_since(
        &self,
        email: &str,
        from: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<Vec<DailyActivity>> {
        sqlx::query_as::<_, DailyActivity>(
            r#"
            SELECT
                d.date,
                COUNT(*) AS reviews,
                COALESCE(SUM(d.review_score), 0)::BIGINT AS likes
            FROM (
                SELECT
                    ((r.created_at AT TIME ZONE 'UTC') + make_interval(mins => $3))::date AS date,
                    r.review_score
                FROM reviews r
                WHERE r.reviewer_email = $1
            ) d
            WHERE d.date >= $2
            GROUP BY d.date
            ORDER BY d.date DESC
            "#,
        )
        .bind(email)
        .bind(from)
        .bind(utc_offset_minutes)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load review history: {:?}", e);
            AppError::Database(e)
        })
    }
}
