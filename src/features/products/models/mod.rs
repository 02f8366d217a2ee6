mod product;

pub use product::{FeedQuery, Product};
