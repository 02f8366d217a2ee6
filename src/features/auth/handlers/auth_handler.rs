use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthRequestDto, UserIdentityDto};
use crate::features::auth::services::AuthService;

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = AuthRequestDto,
    responses(
        (status = 200, description = "Credentials matched", body = UserIdentityDto),
        (status = 400, description = "Missing email or password", body = crate::shared::types::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::shared::types::ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "auth"
)]
pub async fn authenticate(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<AuthRequestDto>,
) -> Result<Json<UserIdentityDto>> {
    let (email, password) = dto.into_credentials()?;
    let user = service.authenticate(&email, &password).await?;
    Ok(Json(user))
}
