//! Raw matrix fixtures.
//!
//! Builds closed DBMs for zones whose clocks are constrained independently
//! (no clock-difference constraints), which covers most test scenarios.

use clockzone_core::{add_raw, negate_to_upper_bound, Bound, Raw, DBM_INF, LE_ZERO};

/// Per-clock interval builder producing a canonical raw buffer.
///
/// # Examples
///
/// ```
/// use clockzone_core::{Bound, LE_ZERO, DBM_INF};
/// use clockzone_test::RawMatrix;
///
/// let raw = RawMatrix::new(2)
///     .lower(1, Bound::le(2))
///     .upper(1, Bound::lt(5))
///     .build();
/// assert_eq!(raw, vec![LE_ZERO, -3, 10, LE_ZERO]);
/// ```
#[derive(Debug, Clone)]
pub struct RawMatrix {
    size: usize,
    lower: Vec<Raw>,
    upper: Vec<Raw>,
}

impl RawMatrix {
    /// Starts from the unconstrained zone over `size - 1` clocks.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            lower: vec![LE_ZERO; size],
            upper: vec![DBM_INF; size],
        }
    }

    /// Sets `clock >= bound` (or `>` for a strict bound).
    pub fn lower(mut self, clock: usize, bound: Bound) -> Self {
        // 0 - clock <= -value; the negation is its own inverse
        self.lower[clock] = negate_to_upper_bound(bound.to_raw());
        self
    }

    /// Sets `clock <= bound` (or `<` for a strict bound).
    pub fn upper(mut self, clock: usize, bound: Bound) -> Self {
        self.upper[clock] = bound.to_raw();
        self
    }

    /// Pins `clock` to exactly `value`.
    pub fn exact(self, clock: usize, value: i32) -> Self {
        self.lower(clock, Bound::le(value)).upper(clock, Bound::le(value))
    }

    /// Produces the closed row-major buffer.
    pub fn build(&self) -> Vec<Raw> {
        let size = self.size;
        let mut dbm = vec![LE_ZERO; size * size];
        for i in 1..size {
            dbm[i] = self.lower[i];
            dbm[i * size] = self.upper[i];
        }
        for i in 1..size {
            for j in 1..size {
                if i != j {
                    // clock_i - clock_j <= upper_i - lower_j
                    dbm[i * size + j] = add_raw(self.upper[i], self.lower[j]);
                }
            }
        }
        dbm
    }
}
