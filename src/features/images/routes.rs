use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::images::handlers;
use crate::features::images::services::ImageService;

pub fn routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route("/api/gen-s3-url", post(handlers::generate_image_url))
        .with_state(service)
}
