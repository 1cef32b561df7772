//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound every upstream call by a per-request deadline
//! - Let the upstream client see the remaining budget
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Timed-out requests return 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Default budget for one upstream call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Returned by [`Deadline::run`] when the deadline fires first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed;

/// A point in time after which an upstream call is abandoned.
///
/// Created once per request and handed to the upstream client. Dropping the
/// future passed to [`Deadline::run`] (e.g. on client disconnect) cancels the
/// call as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
        }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Drive `fut` until it completes or the deadline passes.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Elapsed>
    where
        F: Future,
    {
        tokio::time::timeout_at(self.expires_at, fut)
            .await
            .map_err(|_| Elapsed)
    }
}
