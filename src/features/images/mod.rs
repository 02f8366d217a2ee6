//! Product image links.
//!
//! Images live in object storage at
//! `<prefix>/<scrape_id>/<scrape_id>_1000<ext>`. The extension is unknown
//! up front, so candidates are probed in a fixed order and the first hit
//! is presigned.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/gen-s3-url` | Time-limited URL for a product image |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ImageService;
