use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ReviewerQuery;
use crate::shared::validation::non_blank;

/// Today's review/like counts and the trailing daily history
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(ReviewerQuery),
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardDto),
        (status = 400, description = "Email is required", body = crate::shared::types::ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<ReviewerQuery>,
) -> Result<Json<DashboardDto>> {
    let email =
        non_blank(query.email).ok_or_else(|| AppError::BadRequest("Email is required".into()))?;

    let dashboard = service.summary(&email).await?;
    Ok(Json(dashboard))
}
