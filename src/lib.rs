//! Review Desk: reviewers sign in, work through the unreviewed products
//! of their batch with like/dislike judgments, and check a per-day
//! dashboard of their activity.
//!
//! The HTTP API lives in [`features`]; [`client`] is the reviewer-side
//! session logic used by the `review-client` binary.

pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
