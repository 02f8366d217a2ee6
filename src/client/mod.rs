//! Reviewer-side client: the session state machine, the resume file and
//! an HTTP client for the API.

pub mod api;
pub mod progress;
pub mod session;

pub use api::{ClientError, ReviewApiClient};
pub use progress::{reconcile, ProgressStore, ResumeHint};
pub use session::{ReviewQueue, Session, SessionEvent, SessionState, TransitionError};
