//! S3-compatible storage client
//!
//! Read-only access to the product image bucket: existence probes and
//! presigned GET links. Uses the rust-s3 crate for lightweight S3 operations.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;
use crate::modules::storage::ObjectStore;

/// S3-compatible storage client (path-style addressing)
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    endpoint: String,
}

impl S3ObjectStore {
    /// Create a new client from configuration.
    ///
    /// No network round-trip happens here; the bucket is expected to exist.
    pub fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Storage(format!("Failed to open bucket: {}", e)))?;

        // GCS interop and MinIO both need http://endpoint/bucket/key
        bucket.set_path_style();

        info!(
            "Object storage client initialized for endpoint: {}, bucket: {}",
            config.endpoint,
            bucket.name()
        );

        Ok(Self {
            bucket,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn is_missing(error: &str) -> bool {
        error.contains("404") || error.contains("NoSuchKey") || error.contains("Not Found")
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn exists(&self, key: &str) -> Result<bool, AppError> {
        match self.bucket.head_object(key).await {
            Ok((_, status)) if (200..300).contains(&status) => Ok(true),
            Ok((_, 404)) => Ok(false),
            Ok((_, status)) => Err(AppError::Storage(format!(
                "Unexpected status {} while checking '{}'",
                status, key
            ))),
            Err(e) => {
                let error_str = e.to_string();
                if Self::is_missing(&error_str) {
                    debug!("Object '{}' not found", key);
                    Ok(false)
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to check if object '{}' exists: {}",
                        key, e
                    )))
                }
            }
        }
    }

    async fn presigned_get_url(&self, key: &str, expiry_secs: u32) -> Result<String, AppError> {
        self.bucket
            .presign_get(key, expiry_secs, None)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to generate presigned URL for '{}': {}",
                    key, e
                ))
            })
    }

    fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig {
            endpoint: "https://storage.googleapis.com".to_string(),
            region: "ap-south-1".to_string(),
            bucket: "alle-products".to_string(),
            access_key: "GOOGTESTKEY".to_string(),
            secret_key: "test-secret".to_string(),
            image_prefix: "scraped-assets/v3".to_string(),
            presigned_url_expiry_secs: 604_800,
        }
    }

    #[test]
    fn test_missing_object_errors_are_recognized() {
        assert!(S3ObjectStore::is_missing("Got HTTP 404 with content ''"));
        assert!(S3ObjectStore::is_missing("<Code>NoSuchKey</Code>"));
        assert!(!S3ObjectStore::is_missing("Got HTTP 403 with content 'AccessDenied'"));
    }

    #[tokio::test]
    async fn test_presigned_url_is_path_style_and_scoped() {
        let store = S3ObjectStore::new(&config()).unwrap();
        assert_eq!(store.bucket_name(), "alle-products");
        assert_eq!(store.endpoint(), "https://storage.googleapis.com");

        let url = store
            .presigned_get_url("scraped-assets/v3/42/42_1000.webp", 604_800)
            .await
            .unwrap();

        assert!(url.starts_with(
            "https://storage.googleapis.com/alle-products/scraped-assets/v3/42/42_1000.webp?"
        ));
        assert!(url.contains("X-Amz-Expires=604800"));
        assert!(url.contains("X-Amz-Signature="));
    }
}
