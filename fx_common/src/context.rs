//! Caller contexts and bounded sub-deadlines.
//!
//! A `RequestContext` carries the caller's deadline, if it advertised one. Each
//! hop of the quote chain derives its own `Deadline` from it with
//! [`RequestContext::bounded`]. Sub-deadlines start at the moment they are derived and ignore the caller's deadline and each other, so an
//! expired sibling never shortens the next step. The caller's state is only observed
//! through explicit [`RequestContext::is_done`] checkpoints.
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{QuoteError, Step};
use crate::result::Result;

/// Deadline signal of a caller.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline; never done.
    pub fn background() -> Self {
        RequestContext { deadline: None }
    }

    /// Context that expires `budget` from now. A budget beyond the clock's range
    /// never expires.
    pub fn with_timeout(budget: Duration) -> Self {
        RequestContext {
            deadline: Instant::now().checked_add(budget),
        }
    }

    /// Builds a context from the caller's advertised budget in milliseconds
    /// (the value of [`crate::net::TIMEOUT_HEADER`]). A missing value yields a
    /// background context.
    pub fn from_timeout_header(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Self::background()),
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    QuoteError::Decode(format!("invalid request timeout value: {:?}", raw))
                })?;
                Ok(Self::with_timeout(Duration::from_millis(millis)))
            }
        }
    }

    /// Returns `true` once the caller's deadline has elapsed.
    pub fn is_done(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Derives a fresh sub-deadline of `budget` for `step`, starting now.
    pub fn bounded(&self, step: Step, budget: Duration) -> Deadline {
        Deadline {
            step,
            budget,
            expires_at: Instant::now() + budget,
        }
    }
}

/// Deadline scoped to a single operation.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    step: Step,
    budget: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Budget the step was given when the deadline was derived.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Drives `fut` to completion unless the deadline passes first, in which
    /// case the future is dropped and [`QuoteError::Timeout`] is returned.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout_at(self.expires_at, fut).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::timeout(self.step, self.budget)),
        }
    }
}
