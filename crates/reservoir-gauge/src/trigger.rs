//! Freeze triggers
//!
//! A trigger is a predicate over the evaluation instant. During projection
//! the registered triggers are OR-combined with the built-in depletion
//! check; any one of them firing freezes the resulting snapshot.

use std::fmt;
use std::sync::Arc;

use reservoir_core::Timestamp;

/// A freeze predicate evaluated at the projection target time.
pub type FreezeTrigger = Arc<dyn Fn(Timestamp) -> bool + Send + Sync>;

/// Statically registered list of freeze predicates.
#[derive(Clone, Default)]
pub struct TriggerSet {
    triggers: Vec<FreezeTrigger>,
}

impl TriggerSet {
    pub fn new() -> Self {
        TriggerSet::default()
    }

    /// Register an additional predicate.
    pub fn register(&mut self, trigger: FreezeTrigger) {
        self.triggers.push(trigger);
    }

    /// True if any registered predicate fires at `at`.
    pub fn fires_at(&self, at: Timestamp) -> bool {
        self.triggers.iter().any(|trigger| trigger(at))
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl fmt::Debug for TriggerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerSet")
            .field("registered", &self.triggers.len())
            .finish()
    }
}
