use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth", post(handlers::authenticate))
        .with_state(service)
}
