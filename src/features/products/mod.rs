//! Product feed: the unreviewed products of a reviewer's batch.
//!
//! A product is in the feed while the reviewer has no row in `reviews`
//! for it. Reviews by other reviewers do not hide it, unless the optional
//! per-product review cap is configured.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/products?email=` | Unreviewed products, by `scrape_id` |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProductRepository, ProductRepository};
pub use routes::routes;
pub use services::ProductService;
