use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::features::products::dtos::ProductDto;

/// Database model for `input_products`, plus the derived review count
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub scrape_id: String,
    pub assigned_batch: i32,
    pub brand_name: Option<String>,
    pub product_name: String,
    pub product_primary_image_url: Option<String>,
    pub selling_price: Option<Decimal>,
    pub price_category: Option<String>,
    pub review_count: i64,
}

/// Feed selection for one reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub reviewer_email: String,
    pub batch_number: i32,
    pub limit: i64,
    pub max_reviews_per_product: Option<i64>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            scrape_id: p.scrape_id,
            assigned_batch: p.assigned_batch,
            brand_name: p.brand_name,
            product_name: p.product_name,
            product_primary_image_url: p.product_primary_image_url,
            selling_price: p.selling_price,
            price_category: p.price_category,
            review_count: p.review_count,
        }
    }
}
