//! Application router assembly, shared by the server binary and tests.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::core::{database, middleware};
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::images::{routes as images_routes, ImageService};
use crate::features::products::{routes as products_routes, ProductService};
use crate::features::reviews::{routes as reviews_routes, ReviewService};

/// Every service the API routes depend on
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub products: Arc<ProductService>,
    pub reviews: Arc<ReviewService>,
    pub dashboard: Arc<DashboardService>,
    pub images: Arc<ImageService>,
}

/// The five `/api` endpoints with JSON 404/405 fallbacks
pub fn api_routes(services: AppServices) -> Router {
    Router::new()
        .merge(auth_routes(services.auth))
        .merge(products_routes(services.products))
        .merge(reviews_routes(services.reviews))
        .merge(dashboard_routes(services.dashboard))
        .merge(images_routes(services.images))
        .method_not_allowed_fallback(middleware::method_not_allowed)
        .fallback(middleware::not_found)
}

/// Request id, tracing, CORS and body-size layers
pub fn with_layers(router: Router, config: &AppConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(middleware::cors_layer(config.cors_allowed_origins.clone()))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

pub fn health_routes(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(pool)
}

/// 200 while the database answers, 503 otherwise
async fn health_check(State(pool): State<PgPool>) -> StatusCode {
    match database::ping(&pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Health check failed: {:?}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
