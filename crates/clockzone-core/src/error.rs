//! Error types for ClockZone

use thiserror::Error;

/// Main error type for zone operations.
///
/// Empty zones are not errors: a tightening that empties a zone returns
/// normally and the caller checks `is_valid()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// Two zones (or a zone and a timeline) of different dimension were combined
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A raw buffer whose length is not a non-zero perfect square
    #[error("Raw buffer of length {0} is not a square matrix")]
    NotSquare(usize),

    /// A guard or update names a clock that is not part of the clock list
    #[error("Unknown clock: {0}")]
    UnknownClock(String),

    /// The clock list does not cover the zone's real clocks
    #[error("Clock count mismatch: zone has {expected} clocks, list has {found}")]
    ClockCountMismatch { expected: usize, found: usize },

    /// A finite bound too large to encode without reaching the sentinel
    #[error("Bound {0} is out of the encodable range")]
    BoundOutOfRange(i32),
}

/// Result type alias for zone operations
pub type Result<T> = std::result::Result<T, ZoneError>;
