use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::UserIdentityDto;
use crate::features::auth::repositories::UserRepository;

/// Service for reviewer sign-in
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Verify an email/password pair against the allow-list
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserIdentityDto> {
        match self.users.find_by_credentials(email, password).await? {
            Some(user) => {
                tracing::info!(
                    "Reviewer authenticated: email={}, batch={}",
                    user.email,
                    user.batch_number
                );
                Ok(user.into())
            }
            None => {
                tracing::warn!("Authentication failed for email={}", email);
                Err(AppError::Unauthorized("Invalid credentials".to_string()))
            }
        }
    }
}
