//! Timed gauge snapshots
//!
//! A `TimedGauge` is an immutable reading of a bounded resource anchored to
//! a reference instant, plus the rate model that says how the reading moves
//! as time passes. Projection produces a new snapshot; nothing is ever
//! mutated in place, so a snapshot can be shared across threads freely.

use reservoir_core::{BoundedValue, Clock, GaugeError, GaugeResult, SystemClock, Timestamp};

use crate::projection::Projection;
use crate::trigger::{FreezeTrigger, TriggerSet};

/// Direction of time-based movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the `full` bound.
    #[default]
    Grow,
    /// Toward the `empty` bound.
    Drain,
}

impl Direction {
    /// The ±1 multiplier applied to movement.
    #[inline]
    pub fn factor(self) -> i64 {
        match self {
            Direction::Grow => 1,
            Direction::Drain => -1,
        }
    }

    /// Convert a raw ±1 factor, for callers holding numeric configuration.
    pub fn from_factor(factor: i64) -> GaugeResult<Self> {
        match factor {
            1 => Ok(Direction::Grow),
            -1 => Ok(Direction::Drain),
            other => Err(GaugeError::InvalidDeltaFactor(other)),
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = GaugeError;

    fn try_from(factor: i64) -> GaugeResult<Self> {
        Direction::from_factor(factor)
    }
}

/// Freeze decision for a projection result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FreezeOverride {
    /// Evaluate the depletion check and registered triggers; otherwise
    /// inherit the current freeze flag.
    #[default]
    Auto,
    /// Force the result frozen.
    Freeze,
    /// Force the result unfrozen.
    Thaw,
}

/// Construction parameters for a gauge.
///
/// `timestamp: None` resolves to the clock reading at build time.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeConfig {
    pub full: i64,
    pub empty: i64,
    pub value: i64,
    /// Magnitude of change per elapsed period. Positive; direction comes
    /// from `direction`.
    pub delta: i64,
    /// Seconds per cycle.
    pub period: i64,
    /// Minimum applied step as a fraction of `delta`; zero disables the
    /// remainder correction.
    pub delta_min: f64,
    pub direction: Direction,
    pub freeze: bool,
    pub timestamp: Option<Timestamp>,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        GaugeConfig {
            full: 100,
            empty: 0,
            value: 0,
            delta: 1,
            period: 60,
            delta_min: 0.0,
            direction: Direction::Grow,
            freeze: false,
            timestamp: None,
        }
    }
}

/// An immutable gauge snapshot valid at its reference timestamp.
#[derive(Clone, Debug)]
pub struct TimedGauge {
    bounds: BoundedValue,
    delta: i64,
    period: i64,
    delta_min: f64,
    direction: Direction,
    timestamp: Timestamp,
    freeze: bool,
    triggers: TriggerSet,
}

impl TimedGauge {
    /// Build a gauge, reading the wall clock when no reference timestamp is
    /// supplied.
    pub fn new(config: GaugeConfig) -> GaugeResult<Self> {
        Self::with_clock(config, &SystemClock)
    }

    /// Build a gauge with an injected clock.
    pub fn with_clock(config: GaugeConfig, clock: &dyn Clock) -> GaugeResult<Self> {
        if config.period <= 0 {
            return Err(GaugeError::InvalidPeriod(config.period));
        }
        if !config.delta_min.is_finite() || config.delta_min < 0.0 {
            return Err(GaugeError::InvalidDeltaMin(config.delta_min));
        }
        if config.delta <= 0 {
            return Err(GaugeError::InvalidDelta(config.delta));
        }
        let bounds = BoundedValue::new(config.full, config.value, config.empty)?;
        let timestamp = config.timestamp.unwrap_or_else(|| clock.now());

        Ok(TimedGauge {
            bounds,
            delta: config.delta,
            period: config.period,
            delta_min: config.delta_min,
            direction: config.direction,
            timestamp,
            freeze: config.freeze,
            triggers: TriggerSet::new(),
        })
    }

    /// Attach an additional freeze predicate.
    pub fn with_trigger(mut self, trigger: FreezeTrigger) -> Self {
        self.triggers.register(trigger);
        self
    }

    #[inline]
    pub fn bounds(&self) -> BoundedValue {
        self.bounds
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.bounds.value()
    }

    #[inline]
    pub fn full(&self) -> i64 {
        self.bounds.full()
    }

    #[inline]
    pub fn empty(&self) -> i64 {
        self.bounds.empty()
    }

    #[inline]
    pub fn delta(&self) -> i64 {
        self.delta
    }

    #[inline]
    pub fn period(&self) -> i64 {
        self.period
    }

    #[inline]
    pub fn delta_min(&self) -> f64 {
        self.delta_min
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.freeze
    }

    /// The cycle accounting for this snapshot at `at`, without building a
    /// new snapshot.
    pub fn projection(&self, at: Timestamp) -> Projection {
        Projection::compute(self, at)
    }

    /// True when more cycles have elapsed at `at` than the bound can
    /// absorb.
    pub fn is_depleted_at(&self, at: Timestamp) -> bool {
        self.projection(at).depleted()
    }

    /// Project to `at` with automatic freeze evaluation.
    pub fn project(&self, at: Timestamp) -> GaugeResult<TimedGauge> {
        self.project_with(at, FreezeOverride::Auto)
    }

    /// Project to the injected clock's current reading.
    pub fn project_now(&self, clock: &dyn Clock) -> GaugeResult<TimedGauge> {
        self.project_with(clock.now(), FreezeOverride::Auto)
    }

    /// Project to `at`, returning the snapshot valid at that instant.
    ///
    /// Movement is suppressed while the current snapshot is frozen; the
    /// returned snapshot's reference timestamp becomes `at` either way. A
    /// forced override wins the freeze decision; otherwise depletion and
    /// the registered triggers are OR-combined with the inherited flag.
    pub fn project_with(&self, at: Timestamp, freeze: FreezeOverride) -> GaugeResult<TimedGauge> {
        let plan = self.projection(at);

        let frozen = match freeze {
            FreezeOverride::Freeze => true,
            FreezeOverride::Thaw => false,
            FreezeOverride::Auto => {
                plan.depleted() || self.triggers.fires_at(at) || self.freeze
            }
        };

        tracing::trace!(
            at = at.as_secs(),
            value = plan.value,
            cycles = plan.cycles_elapsed,
            depleted = plan.depleted(),
            frozen,
            "projected gauge"
        );

        // The arithmetic keeps the value in bounds; a failure here is a
        // defect in this library, not caller input.
        self.copy_with(plan.value, at, frozen)
            .map_err(|err| GaugeError::InternalInvariantViolation(Box::new(err)))
    }

    fn copy_with(&self, value: i64, timestamp: Timestamp, freeze: bool) -> GaugeResult<TimedGauge> {
        let bounds = self.bounds.copy_with(value)?;
        Ok(TimedGauge {
            bounds,
            delta: self.delta,
            period: self.period,
            delta_min: self.delta_min,
            direction: self.direction,
            timestamp,
            freeze,
            triggers: self.triggers.clone(),
        })
    }
}

/// Snapshot equality over the numeric state; registered triggers carry no
/// useful equality and are ignored.
impl PartialEq for TimedGauge {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds
            && self.delta == other.delta
            && self.period == other.period
            && self.delta_min == other.delta_min
            && self.direction == other.direction
            && self.timestamp == other.timestamp
            && self.freeze == other.freeze
    }
}
