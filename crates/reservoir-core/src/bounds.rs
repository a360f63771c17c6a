//! The bounded value container
//!
//! A `BoundedValue` holds a reading pinned inside `[empty, full]`. The
//! invariant is checked on every construction; nothing at this layer ever
//! clamps silently.

use crate::{GaugeError, GaugeResult};

/// An immutable reading within a fixed floor and ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundedValue {
    full: i64,
    value: i64,
    empty: i64,
}

impl Default for BoundedValue {
    /// An empty reading on the conventional `[0, 100]` scale.
    fn default() -> Self {
        BoundedValue {
            full: 100,
            value: 0,
            empty: 0,
        }
    }
}

impl BoundedValue {
    /// Construct a bounded value.
    ///
    /// Fails with `InvalidBounds` when `empty >= full` and with
    /// `OutOfRange` when `value` falls outside `[empty, full]`.
    pub fn new(full: i64, value: i64, empty: i64) -> GaugeResult<Self> {
        if empty >= full {
            return Err(GaugeError::InvalidBounds { empty, full });
        }
        if value < empty || value > full {
            return Err(GaugeError::OutOfRange { value, empty, full });
        }
        Ok(BoundedValue { full, value, empty })
    }

    #[inline]
    pub fn full(&self) -> i64 {
        self.full
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub fn empty(&self) -> i64 {
        self.empty
    }

    /// New instance with the same bounds and a different reading,
    /// re-validated. The only way to derive one bounded value from another.
    pub fn copy_with(&self, value: i64) -> GaugeResult<Self> {
        BoundedValue::new(self.full, value, self.empty)
    }

    /// Pin an arbitrary reading inside the bounds.
    #[inline]
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.empty, self.full)
    }

    /// Distance left to the ceiling.
    #[inline]
    pub fn headroom_to_full(&self) -> i64 {
        self.full - self.value
    }

    /// Distance left to the floor.
    #[inline]
    pub fn headroom_to_empty(&self) -> i64 {
        self.value - self.empty
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.value == self.full
    }

    #[inline]
    pub fn is_drained(&self) -> bool {
        self.value == self.empty
    }
}
