//! Time budgets for downstream calls
//!
//! A [`Budget`] is an optional deadline paired with a cancellation token. Budgets form a tree:
//! a derived budget expires no later than its parent and is cancelled whenever its parent is.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};

/// Why a budget stopped admitting work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expired {
    /// The deadline passed
    DeadlineExceeded,
    /// The budget, or one of its ancestors, was cancelled
    Cancelled,
}

/// Cancellable time budget passed explicitly to every suspend-capable call
#[derive(Debug, Clone)]
pub struct Budget {
    deadline: Option<Instant>,
    token: CancellationToken,
}

/// Releases a derived budget when dropped.
///
/// Dropping the guard cancels the derived budget's token and detaches it from its parent,
/// so it must be held for as long as the derived budget is in use.
#[derive(Debug)]
#[must_use = "dropping the guard immediately cancels the derived budget"]
pub struct BudgetGuard {
    _guard: DropGuard,
}

impl Budget {
    /// Root budget with no deadline
    pub fn unbounded() -> Self {
        Self {
            deadline: None,
            token: CancellationToken::new(),
        }
    }

    /// Derive a sub-budget of at most `desired` from this one.
    ///
    /// When `now + desired` lands after this budget's deadline, the derived budget keeps this
    /// budget's deadline and only adds a cancellation link. Otherwise it expires at
    /// `now + desired`. Either way, cancelling `self` cancels the derived budget.
    pub fn derive(&self, desired: Duration) -> (Budget, BudgetGuard) {
        let token = self.token.child_token();
        let guard = BudgetGuard {
            _guard: token.clone().drop_guard(),
        };

        let proposed = Instant::now().checked_add(desired);
        let deadline = match (self.deadline, proposed) {
            (Some(parent), Some(own)) if own > parent => Some(parent),
            (Some(parent), None) => Some(parent),
            (_, own) => own,
        };

        (Budget { deadline, token }, guard)
    }

    /// Absolute deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, saturating at zero
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether this budget no longer admits work, and why
    pub fn expired(&self) -> Option<Expired> {
        if self.token.is_cancelled() {
            return Some(Expired::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Expired::DeadlineExceeded),
            _ => None,
        }
    }

    /// Cancel this budget and every budget derived from it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Resolves once the budget is cancelled or its deadline passes
    pub async fn done(&self) -> Expired {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => Expired::Cancelled,
                _ = sleep_until(deadline) => Expired::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                Expired::Cancelled
            }
        }
    }

    /// Drive `fut` until it completes or the budget fires, whichever comes first.
    ///
    /// When the budget fires first the future is dropped without being polled again.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Expired>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            expired = self.done() => Err(expired),
            output = fut => Ok(output),
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::unbounded()
    }
}
