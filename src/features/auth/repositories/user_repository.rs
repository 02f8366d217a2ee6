use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::UserIdentity;

/// Read access to `user_identities`
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact match on both columns
    async fn find_by_credentials(&self, email: &str, password: &str)
        -> Result<Option<UserIdentity>>;

    async fn find_batch_number(&self, email: &str) -> Result<Option<i32>>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserIdentity>> {
        sqlx::query_as::<_, UserIdentity>(
            r#"
            SELECT email, batch_number
            FROM user_identities
            WHERE email = $1 AND password = $2
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up credentials: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_batch_number(&self, email: &str) -> Result<Option<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT batch_number FROM user_identities WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
