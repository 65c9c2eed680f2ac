//! Quiet-period debouncing for expensive work
//!
//! Parsing and layout are cheap enough to run on every edit. Rasterizing is
//! not, so callers poke a [`Debouncer`] on each change and only export once
//! the input has been quiet for a while. Time is passed in explicitly.

use std::time::{Duration, Instant};

/// Default quiet period before re-rasterizing
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    last_change: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_change: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record a change at `now`, restarting the quiet period
    pub fn poke(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    /// True exactly once per burst of changes, after the quiet period
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(changed) if now.saturating_duration_since(changed) >= self.quiet => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
