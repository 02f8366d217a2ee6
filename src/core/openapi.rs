use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::reviews::{dtos as reviews_dtos, handlers as reviews_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::authenticate,
        // Products
        products_handlers::list_feed,
        // Reviews
        reviews_handlers::submit_review,
        // Dashboard
        dashboard_handlers::get_dashboard,
        // Images
        images_handlers::generate_image_url,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Auth
            auth_dtos::AuthRequestDto,
            auth_dtos::UserIdentityDto,
            // Products
            products_dtos::ProductDto,
            // Reviews
            reviews_dtos::SubmitReviewDto,
            reviews_dtos::ReviewResponseDto,
            reviews_dtos::SubmitReviewResponseDto,
            // Dashboard
            dashboard_dtos::DayStatsDto,
            dashboard_dtos::HistoricalDayDto,
            dashboard_dtos::DashboardDto,
            // Images
            images_dtos::ImageUrlRequestDto,
            images_dtos::ImageUrlResponseDto,
        )
    ),
    tags(
        (name = "auth", description = "Reviewer sign-in"),
        (name = "products", description = "Per-reviewer product feed"),
        (name = "reviews", description = "Like/dislike submissions"),
        (name = "dashboard", description = "Daily review and like counts"),
        (name = "images", description = "Presigned product image URLs"),
    ),
    info(
        title = "Review Desk API",
        version = "0.1.0",
        description = "API documentation for Review Desk",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
