//! Error types for Reservoir

use thiserror::Error;

/// Gauge errors
///
/// Validation variants are raised from caller-supplied parameters at
/// construction time. `InternalInvariantViolation` is different in kind: it
/// is only ever produced when the projection arithmetic itself yields an
/// out-of-range snapshot, which is a defect in this library, not bad input.
#[derive(Error, Debug)]
pub enum GaugeError {
    // Validation errors
    #[error("empty bound {empty} must be strictly below full bound {full}")]
    InvalidBounds { empty: i64, full: i64 },

    #[error("value {value} outside bounds [{empty}, {full}]")]
    OutOfRange { value: i64, empty: i64, full: i64 },

    #[error("delta must be a positive magnitude, got {0}")]
    InvalidDelta(i64),

    #[error("period must be strictly positive, got {0}")]
    InvalidPeriod(i64),

    #[error("delta_min must be a finite non-negative fraction, got {0}")]
    InvalidDeltaMin(f64),

    #[error("delta_factor must be +1 or -1, got {0}")]
    InvalidDeltaFactor(i64),

    // Algorithm defects
    #[error("projection produced an out-of-range snapshot: {0}")]
    InternalInvariantViolation(Box<GaugeError>),
}

impl GaugeError {
    /// True for errors caused by caller-supplied parameters, false for
    /// defects surfaced by the projection itself.
    pub fn is_validation(&self) -> bool {
        !matches!(self, GaugeError::InternalInvariantViolation(_))
    }
}

/// Result type for gauge operations
pub type GaugeResult<T> = Result<T, GaugeError>;
