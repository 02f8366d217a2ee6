use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{IMAGE_EXTENSIONS, IMAGE_VARIANT};

/// Service resolving product ids to presigned image URLs
pub struct ImageService {
    store: Arc<dyn ObjectStore>,
    image_prefix: String,
    expiry_secs: u32,
}

impl ImageService {
    pub fn new(store: Arc<dyn ObjectStore>, image_prefix: String, expiry_secs: u32) -> Self {
        Self {
            store,
            image_prefix: image_prefix.trim_matches('/').to_string(),
            expiry_secs,
        }
    }

    /// Object key of the image rendition for `scrape_id` with extension `ext`
    pub fn image_key(&self, scrape_id: &str, ext: &str) -> String {
        format!(
            "{}/{}/{}_{}{}",
            self.image_prefix, scrape_id, scrape_id, IMAGE_VARIANT, ext
        )
    }

    /// Presign the first existing candidate. A storage failure on any probe
    /// aborts the lookup rather than falling through to the next extension.
    pub async fn presigned_image_url(&self, scrape_id: &str) -> Result<String> {
        for ext in IMAGE_EXTENSIONS {
            let key = self.image_key(scrape_id, ext);

            if self.store.exists(&key).await? {
                let url = self.store.presigned_get_url(&key, self.expiry_secs).await?;
                tracing::info!(
                    "Presigned image URL: bucket={}, key={}, expiry_secs={}",
                    self.store.bucket_name(),
                    key,
                    self.expiry_secs
                );
                return Ok(url);
            }

            tracing::debug!("Image candidate missing: {}", key);
        }

        tracing::info!("No image found for scrape_id={}", scrape_id);
        Err(AppError::NotFound("No valid image found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MemoryObjectStore;

    const PREFIX: &str = "scraped-assets/v3";

    #[test]
    fn test_image_key_layout() {
        let service = ImageService::new(Arc::new(MemoryObjectStore::new()), "/scraped-assets/v3/".into(), 60);
        assert_eq!(
            service.image_key("B07X", ".jpeg"),
            "scraped-assets/v3/B07X/B07X_1000.jpeg"
        );
    }

    #[tokio::test]
    async fn test_first_extension_in_probe_order_wins() {
        let objects = MemoryObjectStore::new()
            .with_object("scraped-assets/v3/p1/p1_1000.png")
            .with_object("scraped-assets/v3/p1/p1_1000.jpg");
        let service = ImageService::new(Arc::new(objects.clone()), PREFIX.into(), 604_800);

        let url = service.presigned_image_url("p1").await.unwrap();

        assert!(url.ends_with("p1_1000.jpg"));
        assert_eq!(objects.last_expiry(), Some(604_800));
    }

    #[tokio::test]
    async fn test_storage_error_is_not_a_miss() {
        let objects = MemoryObjectStore::new()
            .with_object("scraped-assets/v3/p1/p1_1000.webp")
            .failing();
        let service = ImageService::new(Arc::new(objects), PREFIX.into(), 60);

        let err = service.presigned_image_url("p1").await.unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }
}
