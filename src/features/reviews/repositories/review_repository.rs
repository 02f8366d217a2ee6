use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reviews::models::{InsertOutcome, NewReview, Review};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert unless the reviewer already reviewed the product. Atomic:
    /// concurrent duplicates resolve to exactly one row.
    async fn insert(&self, review: &NewReview) -> Result<InsertOutcome>;
}

pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn insert(&self, review: &NewReview) -> Result<InsertOutcome> {
        let inserted = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, scrape_id, reviewer_email, review_score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (scrape_id, reviewer_email) DO NOTHING
            RETURNING id, scrape_id, reviewer_email, review_score, created_at
            "#,
        )
        .bind(review.id)
        .bind(&review.scrape_id)
        .bind(&review.reviewer_email)
        .bind(review.score.as_i16())
        .fetch_optional(&self.pool)
        .await;

        match inserted {
            Ok(Some(row)) => Ok(InsertOutcome::Inserted(row)),
            Ok(None) => Ok(InsertOutcome::Duplicate),
            Err(e)
                if e.as_database_error()
                    .is_some_and(|db| db.is_foreign_key_violation()) =>
            {
                Ok(InsertOutcome::UnknownReference)
            }
            Err(e) => {
                tracing::error!("Failed to insert review: {:?}", e);
                Err(AppError::Database(e))
            }
        }
    }
}
