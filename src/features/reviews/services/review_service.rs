use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reviews::dtos::{ReviewResponseDto, ReviewSubmission};
use crate::features::reviews::models::{InsertOutcome, NewReview};
use crate::features::reviews::repositories::ReviewRepository;

/// Service for recording reviews
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn submit(&self, submission: ReviewSubmission) -> Result<ReviewResponseDto> {
        let review = NewReview {
            id: Uuid::now_v7(),
            scrape_id: submission.scrape_id,
            reviewer_email: submission.reviewer_email,
            score: submission.score,
        };

        match self.reviews.insert(&review).await? {
            InsertOutcome::Inserted(row) => {
                tracing::info!(
                    "Review recorded: id={}, scrape_id={}, reviewer={}, score={}",
                    row.id,
                    row.scrape_id,
                    row.reviewer_email,
                    row.review_score
                );
                Ok(row.into())
            }
            InsertOutcome::Duplicate => {
                tracing::info!(
                    "Duplicate review rejected: scrape_id={}, reviewer={}",
                    review.scrape_id,
                    review.reviewer_email
                );
                Err(AppError::BadRequest(
                    "Review already exists for this product".to_string(),
                ))
            }
            InsertOutcome::UnknownReference => Err(AppError::BadRequest(
                "Unknown product or reviewer".to_string(),
            )),
        }
    }
}
