use std::sync::Arc;

use crate::core::config::FeedConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::UserRepository;
use crate::features::products::dtos::ProductDto;
use crate::features::products::models::FeedQuery;
use crate::features::products::repositories::ProductRepository;

/// Service resolving a reviewer's feed
pub struct ProductService {
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    config: FeedConfig,
}

impl ProductService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        config: FeedConfig,
    ) -> Self {
        Self {
            users,
            products,
            config: config.normalized(),
        }
    }

    /// Unreviewed products in the reviewer's batch. An empty list is a
    /// normal outcome (everything reviewed).
    pub async fn feed(&self, email: &str) -> Result<Vec<ProductDto>> {
        let batch_number = self
            .users
            .find_batch_number(email)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Feed requested for unknown reviewer: {}", email);
                AppError::NotFound("User not found".to_string())
            })?;

        let query = FeedQuery {
            reviewer_email: email.to_string(),
            batch_number,
            limit: self.config.page_size,
            max_reviews_per_product: self.config.max_reviews_per_product,
        };

        let products = self.products.list_unreviewed(&query).await?;

        if products.is_empty() {
            tracing::info!(
                "No unreviewed products left: email={}, batch={}",
                email,
                batch_number
            );
        } else {
            tracing::debug!(
                "Feed resolved: email={}, batch={}, count={}",
                email,
                batch_number,
                products.len()
            );
        }

        Ok(products.into_iter().map(ProductDto::from).collect())
    }
}
