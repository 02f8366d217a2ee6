use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

pub fn routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/submit-review", post(handlers::submit_review))
        .with_state(service)
}
