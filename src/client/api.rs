use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::features::auth::dtos::UserIdentityDto;
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::images::dtos::ImageUrlResponseDto;
use crate::features::products::dtos::ProductDto;
use crate::features::reviews::dtos::SubmitReviewResponseDto;
use crate::features::reviews::ReviewScore;
use crate::shared::types::ErrorResponse;

const ALREADY_REVIEWED: &str = "Review already exists for this product";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's `error` field
    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }

    pub fn is_already_reviewed(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, message }
                if *status == StatusCode::BAD_REQUEST && message == ALREADY_REVIEWED
        )
    }
}

/// HTTP client for the review API
#[derive(Clone)]
pub struct ReviewApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ReviewApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentityDto, ClientError> {
        let response = self
            .http_client
            .post(self.url("/api/auth"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn feed(&self, email: &str) -> Result<Vec<ProductDto>, ClientError> {
        let response = self
            .http_client
            .get(self.url("/api/products"))
            .query(&[("email", email)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn submit_review(
        &self,
        scrape_id: &str,
        reviewer_email: &str,
        score: ReviewScore,
    ) -> Result<SubmitReviewResponseDto, ClientError> {
        let response = self
            .http_client
            .post(self.url("/api/submit-review"))
            .json(&json!({
                "scrape_id": scrape_id,
                "review_score": score.as_i16(),
                "reviewer_email": reviewer_email,
            }))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn dashboard(&self, email: &str) -> Result<DashboardDto, ClientError> {
        let response = self
            .http_client
            .get(self.url("/api/dashboard"))
            .query(&[("email", email)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn image_url(&self, scrape_id: &str) -> Result<String, ClientError> {
        let response = self
            .http_client
            .post(self.url("/api/gen-s3-url"))
            .json(&json!({ "scrape_id": scrape_id }))
            .send()
            .await?;
        decode::<ImageUrlResponseDto>(response)
            .await
            .map(|body| body.url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

    tracing::debug!("API error: HTTP {} - {}", status, body);
    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    use crate::core::router::{api_routes, with_layers};
    use crate::shared::test_helpers::{
        fake_email, test_app_config, test_services, MemoryObjectStore, MemoryStore,
    };

    fn spawn(store: MemoryStore) -> (TestServer, ReviewApiClient) {
        let app = with_layers(
            api_routes(test_services(store, MemoryObjectStore::new())),
            &test_app_config(),
        );
        let server = TestServer::builder().http_transport().build(app).unwrap();
        let base_url = server.server_address().unwrap().to_string();
        (server, ReviewApiClient::new(base_url))
    }

    #[tokio::test]
    async fn test_review_round_trip_over_http() {
        let email = fake_email();
        let store = MemoryStore::new();
        store.add_user(&email, "pw", 4);
        store.add_product("p1", 4);
        let (_server, client) = spawn(store);

        let user = client.authenticate(&email, "pw").await.unwrap();
        assert_eq!(user.batch_number, 4);

        let feed = client.feed(&email).await.unwrap();
        assert_eq!(feed.len(), 1);

        let submitted = client
            .submit_review("p1", &email, ReviewScore::Like)
            .await
            .unwrap();
        assert_eq!(submitted.review.review_score, 1);

        let dashboard = client.dashboard(&email).await.unwrap();
        assert_eq!(dashboard.today.likes, 1);
    }

    #[tokio::test]
    async fn test_server_error_message_is_surfaced() {
        let email = fake_email();
        let store = MemoryStore::new();
        store.add_user(&email, "pw", 1);
        store.add_product("p1", 1);
        let (_server, client) = spawn(store);

        let err = client.authenticate(&email, "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.to_string(), "Invalid credentials");

        client
            .submit_review("p1", &email, ReviewScore::Dislike)
            .await
            .unwrap();
        let duplicate = client
            .submit_review("p1", &email, ReviewScore::Dislike)
            .await
            .unwrap_err();
        assert!(duplicate.is_already_reviewed());
    }
}
