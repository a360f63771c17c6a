//! Gauge simulator - randomized projection schedules on a manual clock
//!
//! Simulates:
//! - A caller holding the latest snapshot and replacing it after each
//!   projection
//! - Irregular polling intervals (partial periods included)
//! - Period-aligned polling, where chained projection must agree with a
//!   direct projection from the origin snapshot

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reservoir_core::{Clock, GaugeResult, ManualClock};
use reservoir_gauge::{GaugeConfig, TimedGauge};

/// One simulated caller re-projecting a gauge over time.
pub struct GaugeSimulator {
    /// Snapshot the run started from.
    origin: TimedGauge,
    /// Latest snapshot held by the simulated caller.
    current: TimedGauge,
    /// The simulated wall clock.
    clock: ManualClock,
    /// Step schedule randomness.
    rng: StdRng,
    /// Whole-period steps only; enables the chained-vs-direct comparison.
    aligned: bool,
    report: SimulationReport,
}

impl GaugeSimulator {
    /// Build a simulator from gauge parameters; the manual clock starts at
    /// zero and anchors the origin snapshot.
    pub fn new(config: GaugeConfig, seed: u64) -> GaugeResult<Self> {
        let clock = ManualClock::new();
        let origin = TimedGauge::with_clock(config, &clock)?;

        Ok(GaugeSimulator {
            current: origin.clone(),
            origin,
            clock,
            rng: StdRng::seed_from_u64(seed),
            aligned: false,
            report: SimulationReport::default(),
        })
    }

    /// Restrict the schedule to whole-period jumps.
    pub fn aligned(mut self) -> Self {
        self.aligned = true;
        self
    }

    /// Latest snapshot.
    pub fn current(&self) -> &TimedGauge {
        &self.current
    }

    /// Accumulated statistics and violation counters.
    pub fn report(&self) -> &SimulationReport {
        &self.report
    }

    /// Run `steps` projection steps.
    pub fn run(&mut self, steps: u64) -> &SimulationReport {
        for _ in 0..steps {
            self.step();
        }
        &self.report
    }

    /// Advance the clock by a random interval and re-project.
    pub fn step(&mut self) {
        let period = self.current.period();
        let dt = if self.aligned {
            self.rng.gen_range(1..=24i64) * period
        } else {
            self.rng.gen_range(0..period * 3)
        };
        self.clock.advance(dt);
        let now = self.clock.now();

        let was_frozen = self.current.is_frozen();
        let previous_value = self.current.value();

        let next = match self.current.project_now(&self.clock) {
            Ok(next) => next,
            Err(_) => {
                self.report.projection_failures += 1;
                self.report.steps += 1;
                return;
            }
        };

        self.report.record(&next);

        if next.value() < next.empty() || next.value() > next.full() {
            self.report.bounds_violations += 1;
        }
        if was_frozen && next.value() != previous_value {
            self.report.freeze_violations += 1;
        }
        if self.aligned {
            // every aligned step keeps the schedule on period boundaries,
            // so the chained snapshot must match a direct projection
            match self.origin.project(now) {
                Ok(direct) if direct == next => {}
                _ => self.report.chain_divergences += 1,
            }
        }

        self.current = next;
    }
}

/// Simulation statistics and invariant counters.
#[derive(Clone, Debug, Default)]
pub struct SimulationReport {
    /// Total projection steps executed.
    pub steps: u64,
    /// Projections that returned an error.
    pub projection_failures: u64,
    /// Results outside their own bounds.
    pub bounds_violations: u64,
    /// Frozen snapshots that still moved.
    pub freeze_violations: u64,
    /// Aligned chained results that disagreed with direct projection.
    pub chain_divergences: u64,
    /// Steps observed in the frozen state.
    pub frozen_steps: u64,
    /// Step at which the gauge first froze, if it did.
    pub first_frozen_step: Option<u64>,
    /// Extremes observed across the run.
    pub min_value: i64,
    pub max_value: i64,
}

impl SimulationReport {
    fn record(&mut self, snapshot: &TimedGauge) {
        if self.steps == 0 {
            self.min_value = snapshot.value();
            self.max_value = snapshot.value();
        } else {
            self.min_value = self.min_value.min(snapshot.value());
            self.max_value = self.max_value.max(snapshot.value());
        }

        if snapshot.is_frozen() {
            self.frozen_steps += 1;
            if self.first_frozen_step.is_none() {
                self.first_frozen_step = Some(self.steps);
            }
        }

        self.steps += 1;
    }

    /// No invariant counter fired.
    pub fn clean(&self) -> bool {
        self.projection_failures == 0
            && self.bounds_violations == 0
            && self.freeze_violations == 0
            && self.chain_divergences == 0
    }
}

/// Predefined simulation scenarios
pub mod scenarios {
    use reservoir_gauge::Direction;

    use super::*;

    /// Large regenerating stockpile, no minimum step.
    pub fn regenerating_pool() -> GaugeSimulator {
        GaugeSimulator::new(
            GaugeConfig {
                full: 60000,
                delta: 100,
                period: 3600,
                ..GaugeConfig::default()
            },
            1,
        )
        .unwrap()
    }

    /// Draining pot with a whole-delta minimum step.
    pub fn draining_pot() -> GaugeSimulator {
        GaugeSimulator::new(
            GaugeConfig {
                full: 28000,
                value: 28000,
                delta: 40,
                period: 3600,
                delta_min: 1.0,
                direction: Direction::Drain,
                ..GaugeConfig::default()
            },
            2,
        )
        .unwrap()
    }

    /// Growing gauge with a fractional minimum step and awkward headroom.
    pub fn fractional_drip() -> GaugeSimulator {
        GaugeSimulator::new(
            GaugeConfig {
                full: 1000,
                value: 115,
                delta: 100,
                period: 3600,
                delta_min: 1.0 / 3.0,
                ..GaugeConfig::default()
            },
            3,
        )
        .unwrap()
    }

    /// Gauge constructed frozen; nothing should ever move.
    pub fn frozen_gauge() -> GaugeSimulator {
        GaugeSimulator::new(
            GaugeConfig {
                full: 60000,
                value: 1234,
                delta: 100,
                period: 3600,
                freeze: true,
                ..GaugeConfig::default()
            },
            4,
        )
        .unwrap()
    }
}
