mod review;

pub use review::{InsertOutcome, NewReview, Review, ReviewScore};
