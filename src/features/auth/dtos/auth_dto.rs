use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::shared::validation::{missing_fields, non_blank};

/// Request DTO for reviewer sign-in
///
/// Fields are optional so that absent ones can be reported together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AuthRequestDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AuthRequestDto {
    /// Split into `(email, password)`, failing with every missing field
    pub fn into_credentials(self) -> Result<(String, String)> {
        let email = non_blank(self.email);
        let password = self.password.filter(|p| !p.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            (email, password) => Err(missing_fields(&[
                ("email", email.is_some()),
                ("password", password.is_some()),
            ])),
        }
    }
}

/// The matched reviewer. The password column is never echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserIdentityDto {
    pub email: String,
    pub batch_number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    #[test]
    fn test_into_credentials_trims_email() {
        let dto = AuthRequestDto {
            email: Some(" a@x.com ".to_string()),
            password: Some("p".to_string()),
        };
        let (email, password) = dto.into_credentials().unwrap();
        assert_eq!(email, "a@x.com");
        assert_eq!(password, "p");
    }

    #[test]
    fn test_into_credentials_reports_both_missing() {
        match AuthRequestDto::default().into_credentials() {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["email", "password"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
