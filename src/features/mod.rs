pub mod auth;
pub mod dashboard;
pub mod images;
pub mod products;
pub mod reviews;
