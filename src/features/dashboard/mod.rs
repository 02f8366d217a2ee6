//! Personal dashboard: a reviewer's review and like counts per local day.
//!
//! Days are bucketed at a fixed UTC offset (`DASHBOARD_UTC_OFFSET_MINUTES`).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/dashboard?email=` | Today's counts and the trailing history |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{ActivityRepository, PgActivityRepository};
pub use routes::routes;
pub use services::DashboardService;
