use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reviews::models::ReviewScore;
use crate::shared::validation::{deserialize_optional_id, missing_fields, non_blank};

/// Request DTO for a review submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct SubmitReviewDto {
    /// Product id; a JSON string or integer
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    #[schema(value_type = Option<String>)]
    pub scrape_id: Option<String>,

    /// 1 = like, 0 = dislike
    #[validate(range(min = 0, max = 1, message = "review_score must be 0 or 1"))]
    #[schema(minimum = 0, maximum = 1)]
    pub review_score: Option<i64>,

    #[validate(length(max = 320, message = "reviewer_email must not exceed 320 characters"))]
    pub reviewer_email: Option<String>,
}

/// Validated fields of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub scrape_id: String,
    pub reviewer_email: String,
    pub score: ReviewScore,
}

impl SubmitReviewDto {
    /// A present `review_score` of 0 is valid; only absence is missing.
    pub fn validate_submission(self) -> Result<ReviewSubmission> {
        let scrape_id = non_blank(self.scrape_id);
        let reviewer_email = non_blank(self.reviewer_email);

        match (scrape_id, self.review_score, reviewer_email) {
            (Some(scrape_id), Some(raw_score), Some(reviewer_email)) => {
                let score = ReviewScore::try_from(raw_score).map_err(|_| {
                    AppError::Validation("review_score must be 0 or 1".to_string())
                })?;
                Ok(ReviewSubmission {
                    scrape_id,
                    reviewer_email,
                    score,
                })
            }
            (scrape_id, review_score, reviewer_email) => Err(missing_fields(&[
                ("scrape_id", scrape_id.is_some()),
                ("review_score", review_score.is_some()),
                ("reviewer_email", reviewer_email.is_some()),
            ])),
        }
    }
}

/// Response DTO for a stored review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub id: Uuid,
    pub scrape_id: String,
    pub reviewer_email: String,
    pub review_score: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewResponseDto {
    pub message: String,
    pub review: ReviewResponseDto,
}
