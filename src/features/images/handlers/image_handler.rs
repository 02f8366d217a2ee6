use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::images::dtos::{ImageUrlRequestDto, ImageUrlResponseDto};
use crate::features::images::services::ImageService;

/// Generate a time-limited URL for a product image
#[utoipa::path(
    post,
    path = "/api/gen-s3-url",
    request_body = ImageUrlRequestDto,
    responses(
        (status = 200, description = "Presigned GET URL", body = ImageUrlResponseDto),
        (status = 400, description = "Missing or invalid scrape_id", body = crate::shared::types::ErrorResponse),
        (status = 404, description = "No valid image found", body = crate::shared::types::ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Storage error")
    ),
    tag = "images"
)]
pub async fn generate_image_url(
    State(service): State<Arc<ImageService>>,
    AppJson(dto): AppJson<ImageUrlRequestDto>,
) -> Result<Json<ImageUrlResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let scrape_id = dto.into_scrape_id()?;
    let url = service.presigned_image_url(&scrape_id).await?;
    Ok(Json(ImageUrlResponseDto { url }))
}
