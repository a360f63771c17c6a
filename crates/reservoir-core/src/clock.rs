//! Clock sources
//!
//! Projection never reads the wall clock directly; callers hand a `Clock`
//! to the operations that default to "now", which keeps every computation
//! replayable under test.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Timestamp;

/// Source of the current time, in whole seconds.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock source backed by the system clock (unix seconds).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Timestamp::from_secs(secs)
    }
}

/// Manually driven clock for tests and simulations.
///
/// Time only moves when the caller moves it. The value lives in an atomic
/// so one shared clock can be advanced without locking.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a clock pinned at zero.
    pub fn new() -> Self {
        ManualClock::default()
    }

    /// Create a clock pinned at `at`.
    pub fn starting_at(at: Timestamp) -> Self {
        ManualClock {
            now: AtomicI64::new(at.as_secs()),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, at: Timestamp) {
        self.now.store(at.as_secs(), Ordering::Relaxed);
    }

    /// Move the clock forward by `secs`, saturating on overflow.
    pub fn advance(&self, secs: i64) {
        self.now
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(secs))
            })
            .ok();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.now.load(Ordering::Relaxed))
    }
}
