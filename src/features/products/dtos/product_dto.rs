use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One feed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub scrape_id: String,
    pub assigned_batch: i32,
    pub brand_name: Option<String>,
    pub product_name: String,
    pub product_primary_image_url: Option<String>,
    /// Decimal serialized as a string, e.g. "499.00"
    #[schema(value_type = Option<String>)]
    pub selling_price: Option<Decimal>,
    pub price_category: Option<String>,
    /// Reviews recorded for this product by any reviewer, counted on read
    pub review_count: i64,
}
