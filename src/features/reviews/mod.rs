//! Review submission.
//!
//! At most one review per `(scrape_id, reviewer_email)` is enforced by a
//! unique constraint; the conflicting insert is reported as a 400 rather
//! than checked beforehand. Reviews are append-only.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/submit-review` | Record a like (1) or dislike (0) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use models::ReviewScore;
pub use repositories::{PgReviewRepository, ReviewRepository};
pub use routes::routes;
pub use services::ReviewService;
