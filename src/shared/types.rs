use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Error body returned by every endpoint on failure.
///
/// Clients surface `error` verbatim in their banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Query parameters identifying the reviewer
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewerQuery {
    /// Reviewer email returned by `/api/auth`
    pub email: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            errors: None,
        }
    }

    pub fn with_errors(error: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            error: error.into(),
            errors: Some(errors),
        }
    }
}
