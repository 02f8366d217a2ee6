use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::Result;
use crate::shared::validation::{deserialize_optional_id, missing_fields, non_blank, SCRAPE_ID_REGEX};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct ImageUrlRequestDto {
    /// Product id; a JSON string or integer. Interpolated into an object
    /// key, so only `[A-Za-z0-9_-]` is accepted.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    #[validate(regex(
        path = *SCRAPE_ID_REGEX,
        message = "scrape_id may only contain letters, digits, '-' and '_'"
    ))]
    #[schema(value_type = Option<String>, example = "B07XJ8C8F5")]
    pub scrape_id: Option<String>,
}

impl ImageUrlRequestDto {
    pub fn into_scrape_id(self) -> Result<String> {
        non_blank(self.scrape_id).ok_or_else(|| missing_fields(&[("scrape_id", false)]))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageUrlResponseDto {
    pub url: String,
}
