use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reviews::dtos::{SubmitReviewDto, SubmitReviewResponseDto};
use crate::features::reviews::services::ReviewService;

/// Submit a like/dislike for a product
#[utoipa::path(
    post,
    path = "/api/submit-review",
    request_body = SubmitReviewDto,
    responses(
        (status = 200, description = "Review recorded", body = SubmitReviewResponseDto),
        (status = 400, description = "Missing fields, invalid score, unknown product, or already reviewed", body = crate::shared::types::ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Database error")
    ),
    tag = "reviews"
)]
pub async fn submit_review(
    State(service): State<Arc<ReviewService>>,
    AppJson(dto): AppJson<SubmitReviewDto>,
) -> Result<Json<SubmitReviewResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let submission = dto.validate_submission()?;
    let review = service.submit(submission).await?;

    Ok(Json(SubmitReviewResponseDto {
        message: "Review submitted successfully".to_string(),
        review,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::features::reviews::dtos::SubmitReviewResponseDto;
    use crate::shared::test_helpers::{test_server, MemoryObjectStore, MemoryStore};

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_user("r@x.com", "p", 1);
        store.add_product("p-001", 1);
        store
    }

    #[tokio::test]
    async fn test_submit_records_review() {
        let store = seeded();
        let server = test_server(store.clone(), MemoryObjectStore::new());

        let response = server
            .post("/api/submit-review")
            .json(&json!({"scrape_id": "p-001", "review_score": 0, "reviewer_email": "r@x.com"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: SubmitReviewResponseDto = response.json();
        assert_eq!(body.message, "Review submitted successfully");
        assert_eq!(body.review.scrape_id, "p-001");
        assert_eq!(body.review.review_score, 0);
        assert_eq!(store.review_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_review_is_rejected_once_stored() {
        let store = seeded();
        let server = test_server(store.clone(), MemoryObjectStore::new());
        let body = json!({"scrape_id": "p-001", "review_score": 1, "reviewer_email": "r@x.com"});

        let first = server.post("/api/submit-review").json(&body).await;
        let second = server.post("/api/submit-review").json(&body).await;

        assert_eq!(first.status_code(), StatusCode::OK);
        assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            second.json::<Value>()["error"],
            "Review already exists for this product"
        );
        assert_eq!(store.review_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_lists_missing_fields() {
        let store = seeded();
        let server = test_server(store.clone(), MemoryObjectStore::new());

        let response = server.post("/api/submit-review").json(&json!({})).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(
            body["errors"],
            json!(["scrape_id", "review_score", "reviewer_email"])
        );
        assert_eq!(store.review_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_bad_request() {
        let store = seeded();
        let server = test_server(store.clone(), MemoryObjectStore::new());

        let response = server
            .post("/api/submit-review")
            .json(&json!({"scrape_id": "nope", "review_score": 1, "reviewer_email": "r@x.com"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Unknown product or reviewer");
        assert_eq!(store.review_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_rejected() {
        let store = seeded();
        let server = test_server(store.clone(), MemoryObjectStore::new());

        let response = server
            .post("/api/submit-review")
            .json(&json!({"scrape_id": "p-001", "review_score": 3, "reviewer_email": "r@x.com"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["errors"].is_array());
        assert_eq!(store.review_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = test_server(seeded(), MemoryObjectStore::new());

        let response = server
            .post("/api/submit-review")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let store = seeded();
        let server = test_server(store.clone(), MemoryObjectStore::new());

        let response = server.get("/api/submit-review").await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Method not allowed"})
        );
        assert_eq!(store.review_count(), 0);
    }
}
