//! Reviewer session as an explicit state machine.
//!
//! ```text
//! Unauthenticated -> Authenticating -> FeedLoading -> Reviewing <-> Submitting
//!                                           |                          |
//!                                           +--------> Complete <------+
//! ```
//!
//! A failed feed load keeps the session in `FeedLoading` so the caller can
//! retry without signing in again.
//!
//! Exactly one state is active. Only [`SessionEvent`]s move it, and an
//! event that does not apply to the current state is refused without
//! changing anything. While `Submitting` no further review can be
//! requested, so one submission is in flight at a time.

use std::fmt;

use thiserror::Error;

use crate::features::products::dtos::ProductDto;
use crate::features::reviews::ReviewScore;

/// Products still to review, and the one currently shown
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewQueue {
    products: Vec<ProductDto>,
    position: usize,
}

impl ReviewQueue {
    /// `None` when there is nothing to review from `start` on
    pub fn new(products: Vec<ProductDto>, start: usize) -> Option<Self> {
        if start < products.len() {
            Some(Self {
                products,
                position: start,
            })
        } else {
            None
        }
    }

    pub fn current(&self) -> &ProductDto {
        &self.products[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.products.len() - self.position
    }

    pub fn products(&self) -> &[ProductDto] {
        &self.products
    }

    /// Move past the current product; `None` once the queue is exhausted
    fn advance(mut self) -> Option<Self> {
        self.position += 1;
        (self.position < self.products.len()).then_some(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating { email: String },
    FeedLoading { email: String },
    Reviewing { email: String, queue: ReviewQueue },
    Submitting {
        email: String,
        queue: ReviewQueue,
        score: ReviewScore,
    },
    Complete { email: String },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticating { .. } => "authenticating",
            SessionState::FeedLoading { .. } => "feed-loading",
            SessionState::Reviewing { .. } => "reviewing",
            SessionState::Submitting { .. } => "submitting",
            SessionState::Complete { .. } => "complete",
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            SessionState::Unauthenticated => None,
            SessionState::Authenticating { email }
            | SessionState::FeedLoading { email }
            | SessionState::Reviewing { email, .. }
            | SessionState::Submitting { email, .. }
            | SessionState::Complete { email } => Some(email),
        }
    }

    pub fn queue(&self) -> Option<&ReviewQueue> {
        match self {
            SessionState::Reviewing { queue, .. } | SessionState::Submitting { queue, .. } => {
                Some(queue)
            }
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoginRequested { email: String },
    LoginSucceeded,
    LoginFailed { message: String },
    /// Fresh feed from the server; `start` comes from the resume hint
    FeedLoaded {
        products: Vec<ProductDto>,
        start: usize,
    },
    FeedFailed { message: String },
    ReviewRequested(ReviewScore),
    ReviewAccepted,
    /// The server already holds a review for the current product
    ReviewSkipped,
    ReviewRejected { message: String },
    Logout,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::LoginRequested { .. } => "login-requested",
            SessionEvent::LoginSucceeded => "login-succeeded",
            SessionEvent::LoginFailed { .. } => "login-failed",
            SessionEvent::FeedLoaded { .. } => "feed-loaded",
            SessionEvent::FeedFailed { .. } => "feed-failed",
            SessionEvent::ReviewRequested(_) => "review-requested",
            SessionEvent::ReviewAccepted => "review-accepted",
            SessionEvent::ReviewSkipped => "review-skipped",
            SessionEvent::ReviewRejected { .. } => "review-rejected",
            SessionEvent::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot apply {event} while {state}")]
pub struct TransitionError {
    pub state: &'static str,
    pub event: &'static str,
}

/// Current state plus the banner and the in-session review counter
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: SessionState,
    banner: Option<String>,
    reviewed: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            banner: None,
            reviewed: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Last failure message, cleared by the next successful transition
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Reviews accepted by the server during this session
    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<&SessionState, TransitionError> {
        let current = std::mem::replace(&mut self.state, SessionState::Unauthenticated);

        match Self::transition(current, event) {
            Ok((next, outcome)) => {
                self.state = next;
                match outcome {
                    Outcome::Failed(message) => self.banner = Some(message),
                    Outcome::Reviewed => {
                        self.reviewed += 1;
                        self.banner = None;
                    }
                    Outcome::Reset => {
                        self.reviewed = 0;
                        self.banner = None;
                    }
                    Outcome::Ok => self.banner = None,
                }
                Ok(&self.state)
            }
            Err((current, error)) => {
                self.state = current;
                Err(error)
            }
        }
    }

    fn transition(
        state: SessionState,
        event: SessionEvent,
    ) -> Result<(SessionState, Outcome), (SessionState, TransitionError)> {
        use SessionEvent as E;
        use SessionState as S;

        let next = match (state, event) {
            (_, E::Logout) => (S::Unauthenticated, Outcome::Reset),

            (S::Unauthenticated | S::Complete { .. }, E::LoginRequested { email }) => {
                (S::Authenticating { email }, Outcome::Reset)
            }
            (S::Authenticating { email }, E::LoginSucceeded) => {
                (S::FeedLoading { email }, Outcome::Ok)
            }
            (S::Authenticating { .. }, E::LoginFailed { message }) => {
                (S::Unauthenticated, Outcome::Failed(message))
            }

            (S::FeedLoading { email }, E::FeedLoaded { products, start }) => {
                match ReviewQueue::new(products, start) {
                    Some(queue) => (S::Reviewing { email, queue }, Outcome::Ok),
                    None => (S::Complete { email }, Outcome::Ok),
                }
            }
            (S::FeedLoading { email }, E::FeedFailed { message }) => {
                (S::FeedLoading { email }, Outcome::Failed(message))
            }

            (S::Reviewing { email, queue }, E::ReviewRequested(score)) => (
                S::Submitting {
                    email,
                    queue,
                    score,
                },
                Outcome::Ok,
            ),
            (S::Submitting { email, queue, .. }, E::ReviewAccepted) => {
                (Self::after_current(email, queue), Outcome::Reviewed)
            }
            (S::Submitting { email, queue, .. }, E::ReviewSkipped) => {
                (Self::after_current(email, queue), Outcome::Ok)
            }
            (S::Submitting { email, queue, .. }, E::ReviewRejected { message }) => {
                (S::Reviewing { email, queue }, Outcome::Failed(message))
            }

            (state, event) => {
                let error = TransitionError {
                    state: state.name(),
                    event: event.name(),
                };
                return Err((state, error));
            }
        };

        Ok(next)
    }

    fn after_current(email: String, queue: ReviewQueue) -> SessionState {
        match queue.advance() {
            Some(queue) => SessionState::Reviewing { email, queue },
            None => SessionState::Complete { email },
        }
    }
}

enum Outcome {
    Ok,
    Reviewed,
    Reset,
    Failed(String),
}
