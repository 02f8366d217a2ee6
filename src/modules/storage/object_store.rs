use async_trait::async_trait;

use crate::core::error::AppError;

/// Minimal read-side view of an object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `Ok(false)` when the object is absent; other failures are errors.
    async fn exists(&self, key: &str) -> Result<bool, AppError>;

    /// Time-limited GET link for `key`
    async fn presigned_get_url(&self, key: &str, expiry_secs: u32) -> Result<String, AppError>;

    fn bucket_name(&self) -> String;
}
