use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{FeedQuery, Product};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products of `query.batch_number` with no review from
    /// `query.reviewer_email`, ordered by `scrape_id`, at most `query.limit`.
    async fn list_unreviewed(&self, query: &FeedQuery) -> Result<Vec<Product>>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_unreviewed(&self, query: &FeedQuery) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT p.scrape_id,
                   p.assigned_batch,
                   p.brand_name,
                   p.product_name,
                   p.product_primary_image_url,
                   p.selling_price,
                   p.price_category,
                   COALESCE(counts.review_count, 0) AS review_count
            FROM input_products p
            LEFT JOIN reviews mine
                   ON mine.scrape_id = p.scrape_id AND mine.reviewer_email = $1
            LEFT JOIN (
                SELECT scrape_id, COUNT(*) AS review_count
                FROM reviews
                GROUP BY scrape_id
            ) counts ON counts.scrape_id = p.scrape_id
            WHERE p.assigned_batch = $2
              AND mine.id IS NULL
              AND ($4::BIGINT IS NULL OR COALESCE(counts.review_count, 0) < $4)
            ORDER BY p.scrape_id
            LIMIT $3
            "#,
        )
        .bind(&query.reviewer_email)
        .bind(query.batch_number)
        .bind(query.limit)
        .bind(query.max_reviews_per_product)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch product feed: {:?}", e);
            AppError::Database(e)
        })
    }
}
