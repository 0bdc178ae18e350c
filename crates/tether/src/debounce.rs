//! Single-slot debouncing of resize notifications.
//!
//! The [`Debouncer`] keeps at most one pending deadline. Every signal cancels
//! the pending deadline and arms a new one `delay` after the signal, so a burst
//! of signals collapses into a single firing once the burst has been quiet for
//! `delay`.
//!
//! Time is passed in explicitly as a [`Duration`] since a caller-chosen epoch
//! (for example `performance.now()` in a browser, or an [`std::time::Instant`]
//! baseline natively). This keeps the debouncer free of any clock.

use std::time::Duration;

/// Default delay between the last resize signal and the update pass.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Returns the configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the pending deadline, if any
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns true while a firing is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Cancels any pending deadline and arms a new one at `now + delay`.
    pub fn signal(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Drops the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when the pending deadline has been reached.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
