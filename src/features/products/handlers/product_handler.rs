use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::ProductDto;
use crate::features::products::services::ProductService;
use crate::shared::types::ReviewerQuery;
use crate::shared::validation::non_blank;

/// List the reviewer's unreviewed products
#[utoipa::path(
    get,
    path = "/api/products",
    params(ReviewerQuery),
    responses(
        (status = 200, description = "Unreviewed products, possibly empty", body = Vec<ProductDto>),
        (status = 400, description = "Email is required", body = crate::shared::types::ErrorResponse),
        (status = 404, description = "User not found", body = crate::shared::types::ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "products"
)]
pub async fn list_feed(
    State(service): State<Arc<ProductService>>,
    Query(query): Query<ReviewerQuery>,
) -> Result<Json<Vec<ProductDto>>> {
    let email =
        non_blank(query.email).ok_or_else(|| AppError::BadRequest("Email is required".into()))?;

    let products = service.feed(&email).await?;
    Ok(Json(products))
}
