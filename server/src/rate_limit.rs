//! In-memory rate limiting for application submissions.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by Discord user id.
//!
//! A submission reserves its slot before the relay call, atomically with the
//! window check, so concurrent requests from one user see each other's
//! in-flight submissions. A relay failure releases the reservation, so a
//! failed attempt does not use up the applicant's quota.
//!
//! Users whose window has emptied are dropped from the map by the sweep
//! task, so the map only holds users with submissions inside the window.

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("submission limit exceeded (max {limit} submissions/{window_secs}s)")]
    Exceeded { limit: usize, window_secs: u64 },
}

/// A slot taken in a user's window. Hand it back through
/// [`SubmissionLimiter::release`] if the submission does not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    user_id: String,
    at: Instant,
}

#[derive(Clone)]
pub struct SubmissionLimiter {
    inner: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    limit: usize,
    window: Duration,
}

impl SubmissionLimiter {
    #[must_use]
    pub fn new(limit: usize, window: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), limit, window }
    }

    /// Check the window for `user_id` and take a slot in one step.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Exceeded`] when the window is full; nothing
    /// is recorded in that case.
    pub fn reserve(&self, user_id: &str) -> Result<Reservation, RateLimitError> {
        self.reserve_at(user_id, Instant::now())
    }

    fn reserve_at(&self, user_id: &str, now: Instant) -> Result<Reservation, RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let deque = inner.entry(user_id.to_owned()).or_default();
        prune_window(deque, now, self.window);
        if deque.len() >= self.limit {
            let exceeded = RateLimitError::Exceeded { limit: self.limit, window_secs: self.window.as_secs() };
            if deque.is_empty() {
                inner.remove(user_id);
            }
            return Err(exceeded);
        }
        deque.push_back(now);
        Ok(Reservation { user_id: user_id.to_owned(), at: now })
    }

    /// Give back a slot taken by [`SubmissionLimiter::reserve`].
    pub fn release(&self, reservation: Reservation) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(deque) = inner.get_mut(&reservation.user_id) else {
            return;
        };
        if let Some(index) = deque.iter().rposition(|at| *at == reservation.at) {
            deque.remove(index);
        }
        if deque.is_empty() {
            inner.remove(&reservation.user_id);
        }
    }

    /// Drop users with no submissions left in their window, returning how
    /// many were removed.
    pub fn purge_idle(&self) -> usize {
        self.purge_idle_at(Instant::now())
    }

    fn purge_idle_at(&self, now: Instant) -> usize {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = inner.len();
        inner.retain(|_, deque| {
            prune_window(deque, now, self.window);
            !deque.is_empty()
        });
        before - inner.len()
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

/// Remove entries older than `window` from the front of the deque.
fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) >= window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

/// Spawn the background sweep of idle limiter entries.
pub fn spawn_sweep_task(limiter: SubmissionLimiter, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(every).await;
            let removed = limiter.purge_idle();
            if removed > 0 {
                tracing::debug!(removed, "purged idle submission windows");
            }
        }
    })
}
