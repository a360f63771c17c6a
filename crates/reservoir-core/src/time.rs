//! Time primitives for Reservoir
//!
//! Gauges work in whole seconds: periods are measured in seconds and a
//! snapshot is anchored to a second-resolution reference instant. Partial
//! periods never contribute movement, so finer resolution buys nothing.

use std::ops::{Add, Sub};
use std::time::Duration;

/// A point in time, in whole seconds (unix time for wall-clock sources).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs)
    }

    #[inline]
    pub fn as_secs(self) -> i64 {
        self.0
    }

    /// Signed seconds elapsed since `earlier`. Negative when `self` is
    /// before `earlier`.
    #[inline]
    pub fn seconds_since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }

    #[inline]
    pub fn saturating_add_secs(self, secs: i64) -> Self {
        Timestamp(self.0.saturating_add(secs))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Timestamp(self.0 + rhs.as_secs() as i64)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Timestamp;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        Timestamp(self.0 - rhs.as_secs() as i64)
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}s", self.0)
    }
}
