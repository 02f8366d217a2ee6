//! Reviewer sign-in.
//!
//! An allow-list check against `user_identities`: the email/password pair
//! must match a row exactly. No session or token is issued; the client
//! keeps the email and sends it with every later request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth` | Verify credentials, return the reviewer |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgUserRepository, UserRepository};
pub use routes::routes;
pub use services::AuthService;
