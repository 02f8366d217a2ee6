mod activity_repository;

pub use activity_repository::*;
