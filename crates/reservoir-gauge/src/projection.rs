//! Projection arithmetic
//!
//! Everything here is recomputed fresh from a snapshot and a target
//! instant; nothing is cached between calls. Division is i64 division,
//! truncating toward zero, which also covers the (unreachable in practice)
//! negative-headroom case the same way a float-then-truncate cast would.

use reservoir_core::Timestamp;

use crate::gauge::{Direction, TimedGauge};

/// The derived quantities of one projection.
///
/// `value` is where the gauge lands at `at`; the other fields expose the
/// intermediate cycle accounting for observability and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    /// Target instant of the projection.
    pub at: Timestamp,
    /// Signed seconds between the snapshot reference and `at`.
    pub elapsed: i64,
    /// Whole periods elapsed; zero while frozen or when `at` is not after
    /// the reference.
    pub cycles_elapsed: i64,
    /// Whole delta-steps that fit between the value and the active bound.
    pub cycles_possible: i64,
    /// `cycles_possible`, or zero while frozen.
    pub cycles_available: i64,
    /// `cycles_available - cycles_elapsed`; strictly negative means the
    /// bound absorbed fewer cycles than elapsed.
    pub cycles_remaining: i64,
    /// Headroom left over after all whole delta-steps.
    pub remainder: i64,
    /// Minimum applied step, never below one unit.
    pub subdelta: i64,
    /// Projected value at `at`.
    pub value: i64,
}

impl Projection {
    /// Compute the projection of `gauge` at `at`.
    pub fn compute(gauge: &TimedGauge, at: Timestamp) -> Projection {
        let bounds = gauge.bounds();
        let delta = gauge.delta();
        let frozen = gauge.is_frozen();

        let elapsed = at.seconds_since(gauge.timestamp());
        let cycles_elapsed = if frozen || elapsed <= 0 {
            0
        } else {
            elapsed / gauge.period()
        };

        let headroom = match gauge.direction() {
            Direction::Drain => bounds.headroom_to_empty(),
            Direction::Grow => bounds.headroom_to_full(),
        };
        let cycles_possible = headroom / delta;
        let cycles_available = if frozen { 0 } else { cycles_possible };
        let cycles_remaining = cycles_available.saturating_sub(cycles_elapsed);
        let depleted = cycles_remaining < 0;

        let remainder = headroom % delta;
        let subdelta = ((delta as f64 * gauge.delta_min()).round() as i64).max(1);

        let value = if gauge.delta_min() == 0.0 {
            // Uncapped whole-cycle movement pinned to the bound: the clamp
            // is what lets the gauge land exactly on `full`/`empty` when the
            // headroom is not a whole number of delta-steps.
            let moved = cycles_elapsed.saturating_mul(delta);
            let raw = match gauge.direction() {
                Direction::Grow => bounds.value().saturating_add(moved),
                Direction::Drain => bounds.value().saturating_sub(moved),
            };
            bounds.clamp(raw)
        } else {
            // Whole delta-steps capped at what the bound can absorb; once
            // capped, the remainder is consumed in subdelta-sized steps.
            let whole = cycles_elapsed.min(cycles_available) * delta;
            let partial = if depleted {
                (remainder / subdelta) * subdelta
            } else {
                0
            };
            bounds.value() + (whole + partial) * gauge.direction().factor()
        };

        Projection {
            at,
            elapsed,
            cycles_elapsed,
            cycles_possible,
            cycles_available,
            cycles_remaining,
            remainder,
            subdelta,
            value,
        }
    }

    /// More cycles elapsed than the bound could absorb.
    #[inline]
    pub fn depleted(&self) -> bool {
        self.cycles_remaining < 0
    }
}
