mod activity;

pub use activity::*;
