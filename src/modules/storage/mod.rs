//! Object storage for product images
//!
//! `ObjectStore` is the seam the image service talks to; `S3ObjectStore`
//! implements it for any S3-compatible endpoint (GCS interop, MinIO, AWS).

mod object_store;
mod s3_client;

pub use object_store::ObjectStore;
pub use s3_client::S3ObjectStore;
