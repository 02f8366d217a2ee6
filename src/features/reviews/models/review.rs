use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::reviews::dtos::ReviewResponseDto;

/// Like/dislike judgment, stored as 1/0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewScore {
    Dislike,
    Like,
}

impl ReviewScore {
    pub fn as_i16(self) -> i16 {
        match self {
            ReviewScore::Dislike => 0,
            ReviewScore::Like => 1,
        }
    }
}

impl TryFrom<i64> for ReviewScore {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReviewScore::Dislike),
            1 => Ok(ReviewScore::Like),
            other => Err(other),
        }
    }
}

/// Database model for `reviews`
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub scrape_id: String,
    pub reviewer_email: String,
    pub review_score: i16,
    pub created_at: DateTime<Utc>,
}

/// A validated submission, id already assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub id: Uuid,
    pub scrape_id: String,
    pub reviewer_email: String,
    pub score: ReviewScore,
}

/// Result of an insert attempt
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(Review),
    /// The reviewer already reviewed this product; nothing was written
    Duplicate,
    /// Product or reviewer does not exist
    UnknownReference,
}

impl From<Review> for ReviewResponseDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            scrape_id: r.scrape_id,
            reviewer_email: r.reviewer_email,
            review_score: r.review_score,
            created_at: r.created_at,
        }
    }
}
