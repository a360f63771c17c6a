//! Reservoir Test - Simulation harness for gauge validation
//!
//! Drives gauge snapshots through randomized projection schedules on a
//! manual clock and records invariant violations for tests to assert on.

pub mod simulator;

pub use simulator::*;
